use honeycomb::{DodgeOptions, dodge};

fn pseudo_random(seed: u64, n: usize, span: f64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * span
        })
        .collect()
}

#[test]
fn dodge_keeps_every_pair_separated() {
    let opts = DodgeOptions::new(3.0, 1.5);
    let sep = opts.separation();
    for seed in [1u64, 7, 42] {
        let xs = pseudo_random(seed, 300, 400.0);
        let out = dodge(&xs, |v| *v, &opts).unwrap();
        for i in 0..out.len() {
            for j in (i + 1)..out.len() {
                let dx = out[i].x - out[j].x;
                let dy = out[i].y - out[j].y;
                let d2 = dx * dx + dy * dy;
                assert!(
                    d2 >= sep * sep - honeycomb::dodge::EPSILON - 1e-9,
                    "circles {} and {} overlap (d2={d2})",
                    out[i].index,
                    out[j].index
                );
            }
        }
    }
}

#[test]
fn dodge_returns_one_circle_per_item_with_unchanged_x() {
    let xs = pseudo_random(3, 120, 50.0);
    let out = dodge(&xs, |v| *v, &DodgeOptions::default()).unwrap();
    assert_eq!(out.len(), xs.len());

    let mut seen = vec![false; xs.len()];
    for c in &out {
        assert!(!seen[c.index]);
        seen[c.index] = true;
        assert_eq!(c.x, xs[c.index]);
        assert!(c.y >= 0.0);
    }
}

#[test]
fn dodge_output_is_sorted_and_ties_keep_input_order() {
    let xs = [10.0, 3.0, 10.0, 3.0, 10.0];
    let out = dodge(&xs, |v| *v, &DodgeOptions::default()).unwrap();
    let order = out.iter().map(|c| c.index).collect::<Vec<_>>();
    assert_eq!(order, vec![1, 3, 0, 2, 4]);
}

#[test]
fn dodge_single_item_sits_on_the_baseline() {
    let out = dodge(&[42.0], |v| *v, &DodgeOptions::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].y, 0.0);
    assert_eq!(out[0].x, 42.0);
}

#[test]
fn dodge_is_deterministic() {
    let xs = pseudo_random(11, 200, 120.0);
    let a = dodge(&xs, |v| *v, &DodgeOptions::default()).unwrap();
    let b = dodge(&xs, |v| *v, &DodgeOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dodge_padding_does_not_change_primary_positions() {
    let xs = [1.0, 2.0, 3.0];
    let tight = dodge(&xs, |v| *v, &DodgeOptions::new(3.0, 0.0)).unwrap();
    let loose = dodge(&xs, |v| *v, &DodgeOptions::new(3.0, 4.0)).unwrap();
    for (a, b) in tight.iter().zip(&loose) {
        assert_eq!(a.x, b.x);
    }
    assert!(loose[2].y > tight[2].y);
}
