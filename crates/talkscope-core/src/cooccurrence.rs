use crate::catalog::TagCatalog;
use crate::record::TalkRecord;
use serde::Serialize;

/// Symmetric N×N tag co-occurrence counts over the catalog. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooccurrenceMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl CooccurrenceMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Counts, for every pair of catalog tags, the records carrying both.
    ///
    /// Tags outside the catalog are ignored. Each record contributes at most once per pair.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a TalkRecord>,
        catalog: &TagCatalog,
    ) -> Self {
        let mut matrix = Self::zeros(catalog.len());
        let mut indices: Vec<usize> = Vec::new();
        for record in records {
            indices.clear();
            indices.extend(record.tags.iter().filter_map(|t| catalog.index_of(t)));
            indices.sort_unstable();
            indices.dedup();
            for (k, &i) in indices.iter().enumerate() {
                for &j in &indices[k + 1..] {
                    matrix.cells[i * matrix.size + j] += 1;
                    matrix.cells[j * matrix.size + i] += 1;
                }
            }
        }
        debug_assert!(matrix.is_symmetric());
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Out-of-range lookups read as zero.
    pub fn get(&self, i: usize, j: usize) -> u32 {
        if i >= self.size || j >= self.size {
            return 0;
        }
        self.cells[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[u32] {
        if i >= self.size {
            return &[];
        }
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn row_sum(&self, i: usize) -> u64 {
        self.row(i).iter().map(|&v| u64::from(v)).sum()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::talk;

    #[test]
    fn counts_pairs_once_per_record() {
        let records = vec![
            talk(1, 10, &["a", "b", "c"]),
            talk(2, 10, &["a", "b"]),
            talk(3, 10, &["c"]),
        ];
        let catalog = TagCatalog::from_records(&records, 50);
        let m = CooccurrenceMatrix::from_records(&records, &catalog);
        let (a, b, c) = (
            catalog.index_of("a").unwrap(),
            catalog.index_of("b").unwrap(),
            catalog.index_of("c").unwrap(),
        );
        assert_eq!(m.get(a, b), 2);
        assert_eq!(m.get(a, c), 1);
        assert_eq!(m.get(a, a), 0);
        assert!(m.is_symmetric());
    }

    #[test]
    fn missing_cells_read_as_zero() {
        let m = CooccurrenceMatrix::zeros(2);
        assert_eq!(m.get(5, 0), 0);
        assert!(m.row(9).is_empty());
        assert_eq!(m.total(), 0);
    }
}
