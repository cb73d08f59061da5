//! Arena-backed rooted tree with aggregate weights.
//!
//! Node `0` is always the root. Nodes are appended with [`Hierarchy::push_child`] and never
//! removed; callers rebuild a fresh hierarchy instead of mutating an old one.

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct HierarchyNode<T> {
    pub data: T,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
    /// Aggregate weight; filled by [`Hierarchy::sum`].
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct Hierarchy<T> {
    nodes: Vec<HierarchyNode<T>>,
}

impl<T> Hierarchy<T> {
    pub const ROOT: NodeId = 0;

    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![HierarchyNode {
                data: root,
                parent: None,
                children: Vec::new(),
                depth: 0,
                value: 0.0,
            }],
        }
    }

    pub fn push_child(&mut self, parent: NodeId, data: T) -> NodeId {
        let idx = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(HierarchyNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
            depth,
            value: 0.0,
        });
        self.nodes[parent].children.push(idx);
        idx
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode<T> {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode<T>> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[HierarchyNode<T>] {
        &self.nodes
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id].children.is_empty()
    }

    /// Sets every node's value to its own value plus the sum of its descendants' values.
    pub fn sum(&mut self, own_value: impl Fn(&T) -> f64) {
        for id in self.each_after() {
            let mut total = own_value(&self.nodes[id].data);
            if !total.is_finite() {
                total = 0.0;
            }
            for &c in &self.nodes[id].children {
                total += self.nodes[c].value;
            }
            self.nodes[id].value = total;
        }
    }

    /// Sorts every child list by descending value. Equal values keep insertion order.
    pub fn sort_by_value_desc(&mut self) {
        for id in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[id].children);
            children.sort_by(|a, b| {
                let av = self.nodes[*a].value;
                let bv = self.nodes[*b].value;
                bv.partial_cmp(&av).unwrap_or(std::cmp::Ordering::Equal)
            });
            self.nodes[id].children = children;
        }
    }

    /// Pre-order traversal (parents before children, children in order).
    pub fn each_before(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            for &c in self.nodes[idx].children.iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    /// Post-order traversal (children before parents).
    pub fn each_after(&self) -> Vec<NodeId> {
        let mut next = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(idx) = stack.pop() {
            next.push(idx);
            stack.extend(self.nodes[idx].children.iter().copied());
        }
        next.reverse();
        next
    }

    /// Breadth-first traversal starting at the root.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut queue = std::collections::VecDeque::from([Self::ROOT]);
        while let Some(idx) = queue.pop_front() {
            out.push(idx);
            queue.extend(self.nodes[idx].children.iter().copied());
        }
        out
    }

    /// `id` followed by its parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut cur = self.nodes[id].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p].parent;
        }
        out
    }

    /// Nodes on the way from the root (excluded) down to `id` (included).
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = self.ancestors(id);
        out.pop();
        out.reverse();
        out
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.each_before()
            .into_iter()
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    /// Finds the direct child of `parent` whose data matches `pred`.
    pub fn find_child(&self, parent: NodeId, pred: impl Fn(&T) -> bool) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| pred(&self.nodes[c].data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hierarchy<&'static str> {
        let mut h = Hierarchy::new("root");
        let a = h.push_child(0, "a");
        let b = h.push_child(0, "b");
        h.push_child(a, "a1");
        h.push_child(b, "b1");
        h.push_child(b, "b2");
        h
    }

    #[test]
    fn sum_counts_leaves() {
        let mut h = sample();
        h.sum(|d| if d.len() == 2 { 1.0 } else { 0.0 });
        assert_eq!(h.node(0).value, 3.0);
        assert_eq!(h.node(1).value, 1.0);
        assert_eq!(h.node(2).value, 2.0);
    }

    #[test]
    fn sort_puts_heavier_subtrees_first() {
        let mut h = sample();
        h.sum(|d| if d.len() == 2 { 1.0 } else { 0.0 });
        h.sort_by_value_desc();
        let names = h.node(0).children.iter().map(|&c| h.node(c).data).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn traversals_visit_every_node_once() {
        let h = sample();
        assert_eq!(h.each_before(), vec![0, 1, 3, 2, 4, 5]);
        assert_eq!(h.descendants(), vec![0, 1, 2, 3, 4, 5]);
        let after = h.each_after();
        assert_eq!(after.len(), 6);
        assert_eq!(*after.last().unwrap(), 0);
        assert_eq!(h.path_from_root(5), vec![2, 5]);
    }
}
