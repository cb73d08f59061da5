use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use honeycomb::{Hierarchy, PackOptions, pack};
use std::hint::black_box;
use std::time::Duration;

fn build(groups: usize, per_group: usize) -> Hierarchy<f64> {
    let mut h = Hierarchy::new(0.0);
    for g in 0..groups {
        let parent = h.push_child(0, 0.0);
        for i in 0..per_group {
            let sub = h.push_child(parent, 0.0);
            for k in 0..=(i % 4) {
                h.push_child(sub, 1.0 + ((g * 7 + i * 3 + k) % 11) as f64);
            }
        }
    }
    h.sum(|v| *v);
    h.sort_by_value_desc();
    h
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    group.measurement_time(Duration::from_secs(5));

    let options = PackOptions {
        width: 600.0,
        height: 600.0,
        padding: 3.0,
    };
    for (name, groups, per_group) in [("small", 8usize, 10usize), ("large", 40, 60)] {
        let h = build(groups, per_group);
        group.bench_with_input(BenchmarkId::new("pack", name), &h, |b, h| {
            b.iter(|| black_box(pack(black_box(h), &options).map(|c| c.len()).unwrap_or(0)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
