//! Minimal SVG path builder.
//!
//! Angles follow the chart convention: radians, clockwise, `0` at 12 o'clock.

use super::util::fmt_path_into;
use std::f64::consts::{PI, TAU};

const EPSILON: f64 = 1e-6;

pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    out: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn point(&mut self, x: f64, y: f64) {
        fmt_path_into(&mut self.out, x);
        self.out.push(',');
        fmt_path_into(&mut self.out, y);
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.out.push('M');
        self.point(x, y);
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.out.push('L');
        self.point(x, y);
        self
    }

    pub fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.out.push('Q');
        self.point(cx, cy);
        self.out.push(',');
        self.point(x, y);
        self
    }

    /// Arc around the origin from `a0` to `a1`, assuming the pen is already at `polar(r, a0)`.
    ///
    /// Positive sweeps run clockwise. A full turn is drawn as two half arcs.
    pub fn arc_to(&mut self, radius: f64, a0: f64, a1: f64) -> &mut Self {
        let sweep = a1 - a0;
        if sweep.abs() < EPSILON || radius <= 0.0 {
            return self;
        }
        let clockwise = sweep > 0.0;
        if sweep.abs() >= TAU - EPSILON {
            let mid = if clockwise { a0 + PI } else { a0 - PI };
            self.arc_segment(radius, mid, false, clockwise);
            return self.arc_segment(radius, a0, false, clockwise);
        }
        self.arc_segment(radius, a1, sweep.abs() > PI, clockwise)
    }

    fn arc_segment(&mut self, radius: f64, to: f64, large: bool, clockwise: bool) -> &mut Self {
        let (x, y) = polar(radius, to);
        self.out.push('A');
        self.point(radius, radius);
        self.out.push_str(",0,");
        self.out.push(if large { '1' } else { '0' });
        self.out.push(',');
        self.out.push(if clockwise { '1' } else { '0' });
        self.out.push(',');
        self.point(x, y);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.out.push('Z');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

/// Annular sector between `inner` and `outer` radius.
pub fn annular_sector(inner: f64, outer: f64, a0: f64, a1: f64) -> String {
    let mut path = PathBuilder::new();
    let (x0, y0) = polar(outer, a0);
    path.move_to(x0, y0).arc_to(outer, a0, a1);
    if inner > 0.0 {
        let (x1, y1) = polar(inner, a1);
        path.line_to(x1, y1).arc_to(inner, a1, a0);
    } else {
        path.line_to(0.0, 0.0);
    }
    path.close().finish()
}

/// Ribbon between two arcs on the same circle, bent through the center.
pub fn ribbon(radius: f64, source: (f64, f64), target: (f64, f64)) -> String {
    let (s0, s1) = source;
    let (t0, t1) = target;
    let mut path = PathBuilder::new();
    let (sx, sy) = polar(radius, s0);
    path.move_to(sx, sy).arc_to(radius, s0, s1);
    if s0 != t0 || s1 != t1 {
        let (tx, ty) = polar(radius, t0);
        path.quadratic_to(0.0, 0.0, tx, ty).arc_to(radius, t0, t1);
    }
    path.quadratic_to(0.0, 0.0, sx, sy).close().finish()
}

/// Polyline through `points`.
pub fn polyline(points: impl IntoIterator<Item = (f64, f64)>) -> String {
    let mut path = PathBuilder::new();
    for (i, (x, y)) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.finish()
}
