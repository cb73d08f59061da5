//! Hierarchical enclosing-circle packing.
//!
//! Leaves get a radius proportional to the square root of their value. Each parent's children are
//! packed with the front-chain sibling algorithm and enclosed by the smallest circle containing
//! them. The layout is computed twice: once without padding to learn the scale of the root, then
//! again with padding expressed in that scale, and finally translated and scaled to fit
//! `width × height`.

mod enclose;
mod siblings;

pub use enclose::enclose;
pub use siblings::pack_siblings;

use crate::hierarchy::{Hierarchy, NodeId};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Whether `other` lies entirely inside `self` (within `tolerance`).
    pub fn contains(&self, other: &Circle, tolerance: f64) -> bool {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt() + other.r <= self.r + tolerance
    }

    /// Whether the two circles overlap by more than `tolerance`.
    pub fn overlaps(&self, other: &Circle, tolerance: f64) -> bool {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt() + tolerance < self.r + other.r
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackOptions {
    pub width: f64,
    pub height: f64,
    /// Gap between sibling circles and between children and their parent's outline.
    pub padding: f64,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            padding: 0.0,
        }
    }
}

/// Linear congruential generator with a fixed seed, so enclosing-circle shuffles are repeatable.
#[derive(Debug, Clone)]
pub(crate) struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub(crate) fn new() -> Self {
        Self { state: 1 }
    }

    pub(crate) fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }
}

/// Packs `hierarchy` into `options.width × options.height`.
///
/// Node values must already be summed (see [`Hierarchy::sum`]). The returned vector is indexed by
/// [`NodeId`].
pub fn pack<T>(hierarchy: &Hierarchy<T>, options: &PackOptions) -> Result<Vec<Circle>> {
    let n = hierarchy.len();
    let mut circles = vec![Circle::default(); n];
    let root = hierarchy.root();
    let mut random = Lcg::new();

    let before = hierarchy.each_before();
    let after = hierarchy.each_after();

    for &id in &before {
        if hierarchy.is_leaf(id) {
            let v = hierarchy.node(id).value;
            circles[id].r = if v.is_finite() { v.max(0.0).sqrt() } else { 0.0 };
        }
    }

    for &id in &after {
        pack_children(hierarchy, &mut circles, id, 0.0, &mut random)?;
    }

    let side = options.width.min(options.height);
    let root_r = circles[root].r;
    if !(root_r.is_finite() && root_r > 0.0 && side > 0.0) {
        for c in &mut circles {
            *c = Circle::new(options.width / 2.0, options.height / 2.0, 0.0);
        }
        return Ok(circles);
    }

    let padding = options.padding.max(0.0) * root_r / side;
    if padding > 0.0 {
        for &id in &after {
            pack_children(hierarchy, &mut circles, id, padding, &mut random)?;
        }
    }

    let k = side / (2.0 * circles[root].r);
    circles[root].x = options.width / 2.0;
    circles[root].y = options.height / 2.0;
    for &id in &before {
        circles[id].r *= k;
        if let Some(parent) = hierarchy.node(id).parent {
            circles[id].x = circles[parent].x + k * circles[id].x;
            circles[id].y = circles[parent].y + k * circles[id].y;
        }
    }

    Ok(circles)
}

fn pack_children<T>(
    hierarchy: &Hierarchy<T>,
    circles: &mut [Circle],
    id: NodeId,
    padding: f64,
    random: &mut Lcg,
) -> Result<()> {
    let children = &hierarchy.node(id).children;
    if children.is_empty() {
        return Ok(());
    }

    let mut local = children
        .iter()
        .map(|&c| {
            let mut circle = circles[c];
            circle.r += padding;
            circle
        })
        .collect::<Vec<_>>();

    let enclosing = siblings::pack_siblings_random(&mut local, random).ok_or(
        Error::EnclosureFailed {
            circles: local.len(),
        },
    )?;

    for (&c, placed) in children.iter().zip(&local) {
        circles[c] = Circle::new(placed.x, placed.y, placed.r - padding);
    }
    circles[id].r = enclosing + padding;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_matches_reference_sequence() {
        let mut lcg = Lcg::new();
        let first = lcg.next_f64();
        assert!((first - 1_015_568_748.0 / 4_294_967_296.0).abs() < 1e-15);
        assert!((0.0..1.0).contains(&lcg.next_f64()));
    }

    #[test]
    fn single_leaf_fills_the_square() {
        let mut h = Hierarchy::new(());
        h.push_child(0, ());
        h.sum(|_| 1.0);
        let out = pack(
            &h,
            &PackOptions {
                width: 100.0,
                height: 100.0,
                padding: 0.0,
            },
        )
        .unwrap();
        assert!((out[0].r - 50.0).abs() < 1e-9);
        assert!((out[1].r - 50.0).abs() < 1e-9);
        assert!((out[1].x - 50.0).abs() < 1e-9);
    }
}
