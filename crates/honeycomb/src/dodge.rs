//! One-dimensional "dodge" (beeswarm) packing.
//!
//! Items are placed left to right along the primary axis. Each circle rests either on the
//! baseline (`y = 0`) or on the lowest tangent point above an already placed circle that does
//! not collide with any other placed circle. Placed circles that fall too far behind the current
//! primary coordinate are evicted from the active window, since primary coordinates only grow.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Squared-distance tolerance used by the intersection test.
pub const EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DodgeOptions {
    /// Visual circle radius.
    pub radius: f64,
    /// Extra gap between neighbouring circles. Only affects separation, never the drawn radius.
    pub padding: f64,
}

impl Default for DodgeOptions {
    fn default() -> Self {
        Self {
            radius: 3.0,
            padding: 1.5,
        }
    }
}

impl DodgeOptions {
    pub fn new(radius: f64, padding: f64) -> Self {
        Self { radius, padding }
    }

    /// Minimum center-to-center distance between two placed circles.
    pub fn separation(&self) -> f64 {
        self.radius * 2.0 + self.padding
    }

    fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(Error::InvalidRadius {
                radius: self.radius,
            });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(Error::InvalidRadius {
                radius: self.padding,
            });
        }
        Ok(())
    }
}

/// A placed circle. `index` refers back to the input slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgedCircle {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Resolves secondary-axis positions for `items`.
///
/// The output is sorted by primary coordinate (ties keep input order) and always has one entry per
/// input item.
pub fn dodge<T>(
    items: &[T],
    x: impl Fn(&T) -> f64,
    options: &DodgeOptions,
) -> Result<Vec<DodgedCircle>> {
    options.validate()?;

    let separation = options.separation();
    let separation2 = separation * separation;
    // Eviction reach is "diameter squared", never narrower than one separation.
    let reach = separation2.max(separation);

    let mut circles = items
        .iter()
        .enumerate()
        .map(|(index, item)| DodgedCircle {
            index,
            x: x(item),
            y: 0.0,
        })
        .collect::<Vec<_>>();
    circles.sort_by(|a, b| a.x.total_cmp(&b.x));

    if circles.len() < 2 {
        return Ok(circles);
    }

    let mut window: VecDeque<usize> = VecDeque::new();
    for idx in 0..circles.len() {
        let bx = circles[idx].x;

        while let Some(&head) = window.front() {
            if circles[head].x < bx - reach {
                window.pop_front();
            } else {
                break;
            }
        }

        let mut by = 0.0;
        if intersects(&circles, &window, separation2, bx, by) {
            by = f64::INFINITY;
            for &a in &window {
                let dx = circles[a].x - bx;
                let rest = separation2 - dx * dx;
                if rest < 0.0 {
                    continue;
                }
                let y = circles[a].y + rest.sqrt();
                if y < by && !intersects(&circles, &window, separation2, bx, y) {
                    by = y;
                }
            }
        }

        circles[idx].y = by;
        window.push_back(idx);
    }

    Ok(circles)
}

fn intersects(
    circles: &[DodgedCircle],
    window: &VecDeque<usize>,
    separation2: f64,
    x: f64,
    y: f64,
) -> bool {
    window.iter().any(|&a| {
        let dx = circles[a].x - x;
        let dy = circles[a].y - y;
        separation2 - EPSILON > dx * dx + dy * dy
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_layout() {
        let out = dodge(&[] as &[f64], |v| *v, &DodgeOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn separated_items_stay_on_the_baseline() {
        let xs = [0.0, 100.0, 200.0];
        let out = dodge(&xs, |v| *v, &DodgeOptions::default()).unwrap();
        assert!(out.iter().all(|c| c.y == 0.0));
    }

    #[test]
    fn coincident_items_stack_vertically() {
        let xs = [5.0, 5.0, 5.0];
        let opts = DodgeOptions::new(2.0, 1.0);
        let out = dodge(&xs, |v| *v, &opts).unwrap();
        let ys = out.iter().map(|c| c.y).collect::<Vec<_>>();
        assert_eq!(ys, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn rejects_negative_radius() {
        let err = dodge(&[1.0], |v| *v, &DodgeOptions::new(-1.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidRadius { .. }));
    }
}
