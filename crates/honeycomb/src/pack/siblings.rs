use super::enclose::enclose_random;
use super::{Circle, Lcg};

/// Packs `circles` tightly around the origin, mutating their centers, and returns the radius of
/// the enclosing circle. Returns `None` only if the enclosing-circle search fails.
pub fn pack_siblings(circles: &mut [Circle]) -> Option<f64> {
    let mut random = Lcg::new();
    pack_siblings_random(circles, &mut random)
}

pub(crate) fn pack_siblings_random(circles: &mut [Circle], random: &mut Lcg) -> Option<f64> {
    let n = circles.len();
    if n == 0 {
        return Some(0.0);
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return Some(circles[0].r);
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return Some(circles[0].r + circles[1].r);
    }

    circles[2] = place(&circles[1], &circles[0], circles[2]);

    // Front chain as a circular doubly linked list over circle indices.
    let mut next = vec![0usize; n];
    let mut prev = vec![0usize; n];
    let (mut a, mut b) = (0usize, 1usize);
    next[0] = 1;
    prev[2] = 1;
    next[1] = 2;
    prev[0] = 2;
    next[2] = 0;
    prev[1] = 0;

    let mut i = 3;
    'pack: while i < n {
        circles[i] = place(&circles[a], &circles[b], circles[i]);
        let c = i;

        // Find the closest intersecting circle on the front chain, measured by arc length.
        let mut j = next[b];
        let mut k = prev[a];
        let mut sj = circles[b].r;
        let mut sk = circles[a].r;
        loop {
            if sj <= sk {
                if intersects(&circles[j], &circles[c]) {
                    b = j;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(&circles[k], &circles[c]) {
                    a = k;
                    next[a] = b;
                    prev[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = prev[k];
            }
            if j == next[k] {
                break;
            }
        }

        prev[c] = a;
        next[c] = b;
        next[a] = c;
        prev[b] = c;
        b = c;

        // Pick the chain pair closest to the centroid as the next insertion point.
        let mut best = score(circles, &next, a);
        let mut cur = next[c];
        while cur != b {
            let s = score(circles, &next, cur);
            if s < best {
                a = cur;
                best = s;
            }
            cur = next[cur];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cur = next[b];
    while cur != b {
        chain.push(circles[cur]);
        cur = next[cur];
    }
    let e = enclose_random(&chain, random)?;

    for circle in circles.iter_mut() {
        circle.x -= e.x;
        circle.y -= e.y;
    }
    Some(e.r)
}

/// Positions `c` tangent to both `a` and `b`.
fn place(b: &Circle, a: &Circle, mut c: Circle) -> Circle {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 != 0.0 {
        let a2 = (a.r + c.r) * (a.r + c.r);
        let b2 = (b.r + c.r) * (b.r + c.r);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
    c
}

fn intersects(a: &Circle, b: &Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[Circle], next: &[usize], node: usize) -> f64 {
    let a = &circles[node];
    let b = &circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_circles_touch_at_the_origin() {
        let mut circles = vec![Circle::new(0.0, 0.0, 1.0), Circle::new(0.0, 0.0, 2.0)];
        let r = pack_siblings(&mut circles).unwrap();
        assert_eq!(r, 3.0);
        assert_eq!(circles[0].x, -2.0);
        assert_eq!(circles[1].x, 1.0);
    }

    #[test]
    fn placed_circle_is_tangent_to_both_neighbours() {
        let a = Circle::new(-1.0, 0.0, 1.0);
        let b = Circle::new(1.0, 0.0, 1.0);
        let c = place(&b, &a, Circle::new(0.0, 0.0, 1.0));
        let da = ((c.x - a.x).powi(2) + (c.y - a.y).powi(2)).sqrt();
        let db = ((c.x - b.x).powi(2) + (c.y - b.y).powi(2)).sqrt();
        assert!((da - 2.0).abs() < 1e-9);
        assert!((db - 2.0).abs() < 1e-9);
    }
}
