//! Smallest enclosing circle of a set of circles (randomized incremental, Welzl-style).

use super::{Circle, Lcg};

/// Returns the smallest circle enclosing all `circles`, or `None` for an empty input.
pub fn enclose(circles: &[Circle]) -> Option<Circle> {
    let mut random = Lcg::new();
    enclose_random(circles, &mut random)
}

pub(crate) fn enclose_random(circles: &[Circle], random: &mut Lcg) -> Option<Circle> {
    let mut circles = circles.to_vec();
    shuffle(&mut circles, random);

    let n = circles.len();
    let mut i = 0;
    let mut basis: Vec<Circle> = Vec::new();
    let mut e: Option<Circle> = None;

    while i < n {
        let p = circles[i];
        match e {
            Some(cur) if encloses_weak(&cur, &p) => i += 1,
            _ => {
                basis = extend_basis(&basis, &p)?;
                e = Some(enclose_basis(&basis)?);
                i = 0;
            }
        }
    }

    e
}

fn shuffle(circles: &mut [Circle], random: &mut Lcg) {
    let mut m = circles.len();
    while m > 0 {
        let i = ((random.next_f64() * m as f64) as usize).min(m - 1);
        m -= 1;
        circles.swap(m, i);
    }
}

fn extend_basis(basis: &[Circle], p: &Circle) -> Option<Vec<Circle>> {
    if encloses_weak_all(p, basis) {
        return Some(vec![*p]);
    }

    for b in basis {
        if encloses_not(p, b) && encloses_weak_all(&enclose_basis2(b, p), basis) {
            return Some(vec![*b, *p]);
        }
    }

    for i in 0..basis.len().saturating_sub(1) {
        for j in (i + 1)..basis.len() {
            let (bi, bj) = (&basis[i], &basis[j]);
            if encloses_not(&enclose_basis2(bi, bj), p)
                && encloses_not(&enclose_basis2(bi, p), bj)
                && encloses_not(&enclose_basis2(bj, p), bi)
                && encloses_weak_all(&enclose_basis3(bi, bj, p), basis)
            {
                return Some(vec![*bi, *bj, *p]);
            }
        }
    }

    None
}

fn encloses_not(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: &Circle, b: &Circle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: &Circle, basis: &[Circle]) -> bool {
    basis.iter().all(|b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[Circle]) -> Option<Circle> {
    match basis {
        [a] => Some(*a),
        [a, b] => Some(enclose_basis2(a, b)),
        [a, b, c] => Some(enclose_basis3(a, b, c)),
        _ => None,
    }
}

fn enclose_basis2(a: &Circle, b: &Circle) -> Circle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    Circle {
        x: (a.x + b.x + x21 / l * r21) / 2.0,
        y: (a.y + b.y + y21 / l * r21) / 2.0,
        r: (l + a.r + b.r) / 2.0,
    }
}

fn enclose_basis3(a: &Circle, b: &Circle, c: &Circle) -> Circle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let (x2, y2, r2) = (b.x, b.y, b.r);
    let (x3, y3, r3) = (c.x, c.y, c.r);
    let a2 = x1 - x2;
    let a3 = x1 - x3;
    let b2 = y1 - y2;
    let b3 = y1 - y3;
    let c2 = r2 - r1;
    let c3 = r3 - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - x2 * x2 - y2 * y2 + r2 * r2;
    let d3 = d1 - x3 * x3 - y3 * y3 + r3 * r3;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    Circle {
        x: x1 + xa + xb * r,
        y: y1 + ya + yb * r,
        r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_enclosure() {
        assert_eq!(enclose(&[]), None);
    }

    #[test]
    fn single_circle_encloses_itself() {
        let c = Circle::new(3.0, 4.0, 2.0);
        assert_eq!(enclose(&[c]), Some(c));
    }

    #[test]
    fn two_equal_circles_share_a_midpoint_center() {
        let e = enclose(&[Circle::new(-1.0, 0.0, 1.0), Circle::new(1.0, 0.0, 1.0)]).unwrap();
        assert!(e.x.abs() < 1e-9);
        assert!(e.y.abs() < 1e-9);
        assert!((e.r - 2.0).abs() < 1e-9);
    }
}
