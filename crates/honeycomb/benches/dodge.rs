use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use honeycomb::{DodgeOptions, dodge};
use std::hint::black_box;
use std::time::Duration;

fn log_spread(n: usize) -> Vec<f64> {
    let mut state = 1u64;
    (0..n)
        .map(|_| {
            state = (1_664_525 * state + 1_013_904_223) % (1 << 32);
            let u = state as f64 / (1u64 << 32) as f64;
            // Roughly log-normal, clustered near the middle like view counts.
            (u * u * 0.5 + u * 0.5) * 540.0
        })
        .collect()
}

fn bench_dodge(c: &mut Criterion) {
    let mut group = c.benchmark_group("dodge");
    group.measurement_time(Duration::from_secs(5));

    for n in [500usize, 2_500, 5_000] {
        let xs = log_spread(n);
        group.bench_with_input(BenchmarkId::new("dodge", n), &xs, |b, xs| {
            b.iter(|| {
                let out = dodge(black_box(xs), |v| *v, &DodgeOptions::default());
                black_box(out.map(|v| v.len()).unwrap_or(0));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dodge);
criterion_main!(benches);
