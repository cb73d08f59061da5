//! Continuous scales and tick generation.

/// Linear map from `domain` to `range`. A degenerate domain maps everything to the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span != 0.0 { (value - d0) / span } else { 0.5 };
        r0 + (r1 - r0) * t
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Base-e logarithmic map from a strictly positive `domain` to `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Non-positive inputs are treated as the smallest positive value the domain allows (1).
    pub fn apply(&self, value: f64) -> f64 {
        let value = if value > 0.0 { value } else { 1.0 };
        let l0 = self.domain.0.max(f64::MIN_POSITIVE).ln();
        let l1 = self.domain.1.max(f64::MIN_POSITIVE).ln();
        let (r0, r1) = self.range;
        let span = l1 - l0;
        let t = if span != 0.0 { (value.ln() - l0) / span } else { 0.5 };
        r0 + (r1 - r0) * t
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Roughly `count` evenly spaced "nice" values (multiples of 1, 2 or 5 times a power of ten)
/// within `[start, stop]`, ascending.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !(start.is_finite() && stop.is_finite()) || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    (i1..=i2)
        .map(|i| {
            let i = i as f64;
            if inc < 0.0 { i / -inc } else { i * inc }
        })
        .collect()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !(step.is_finite() && step > 0.0) {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = (start * k).round() as i64;
        i2 = (stop * k).round() as i64;
        if (i1 as f64) / k < start {
            i1 += 1;
        }
        if (i2 as f64) / k > stop {
            i2 -= 1;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = (start / k).round() as i64;
        i2 = (stop / k).round() as i64;
        if (i1 as f64) * k < start {
            i1 += 1;
        }
        if (i2 as f64) * k > stop {
            i2 -= 1;
        }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Formats an integer with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_maps_endpoints() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.apply(0.0), 100.0);
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.apply(5.0), 50.0);
        assert_eq!(LinearScale::new((3.0, 3.0), (0.0, 8.0)).apply(3.0), 4.0);
    }

    #[test]
    fn log_scale_maps_decades_evenly() {
        let s = LogScale::new((1e5, 1e7), (0.0, 200.0));
        assert!((s.apply(1e5) - 0.0).abs() < 1e-9);
        assert!((s.apply(1e6) - 100.0).abs() < 1e-9);
        assert!((s.apply(1e7) - 200.0).abs() < 1e-9);
        assert!(s.apply(0.0) < 0.0);
    }

    #[test]
    fn ticks_are_nice() {
        assert_eq!(
            ticks(0.0, 1.0, 5),
            vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
        );
        assert_eq!(
            ticks(0.0, 45.0, 10),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0]
        );
        assert_eq!(ticks(0.0, 180.0, 10).last(), Some(&180.0));
        assert_eq!(ticks(2.0, 2.0, 10), vec![2.0]);
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(50_000_000), "50,000,000");
    }
}
