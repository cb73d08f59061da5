use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fmt::Write as _;
use std::hint::black_box;
use talkscope::{Dashboard, DashboardConfig, DurationRange, OccupationPath};

const BROADER: [&str; 6] = ["Science", "Technology", "Arts", "Health", "Business", "Education"];
const TAGS: [&str; 12] = [
    "science", "culture", "health", "education", "future", "business", "technology", "art",
    "design", "music", "global", "innovation",
];

fn synthetic_csv(talks: usize) -> String {
    let mut out = String::from(
        "TALK_ID,headline,speaker_1,speaker1_occupation,occupation_categorized,occupation_broader,views,duration,published,tags,public_url\n",
    );
    for i in 0..talks {
        let broader = BROADER[i % BROADER.len()];
        let categorized = format!("{broader} field {}", (i / 7) % 5);
        let occupation = format!("{categorized} role {}", (i / 3) % 4);
        let tags = (0..1 + i % 3)
            .map(|k| TAGS[(i * 5 + k * 7) % TAGS.len()])
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(
            &mut out,
            "{id},Talk {id},Speaker {id},{occupation},{categorized},{broader},{views},0:{minutes:02}:00,{month:02}/{day:02}/{year:02},\"{tags}\",https://talks.example/{id}",
            id = i + 1,
            views = 50_000 + (i * 7_919 % 400) * 25_000,
            minutes = 3 + i % 25,
            month = 1 + i % 12,
            day = 1 + i % 28,
            year = 7 + i % 11,
        );
    }
    out
}

fn bench_initialize(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let mut group = c.benchmark_group("dashboard_initialize");
    for talks in [200usize, 2_000] {
        let csv = synthetic_csv(talks);
        group.bench_with_input(BenchmarkId::from_parameter(talks), &csv, |b, csv| {
            b.iter(|| black_box(Dashboard::from_csv_str(csv, &config).is_ok()))
        });
    }
    group.finish();
}

fn bench_interactions(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let csv = synthetic_csv(2_000);
    let Ok(dashboard) = Dashboard::from_csv_str(&csv, &config) else {
        return;
    };
    let science = OccupationPath::parse("Science").unwrap_or_default();

    let mut group = c.benchmark_group("dashboard_interactions");
    group.bench_function("duration_then_tag_then_focus", |b| {
        b.iter_batched(
            || Dashboard::from_csv_str(&csv, &config),
            |dashboard| {
                let Ok(mut dashboard) = dashboard else {
                    return;
                };
                let _ = dashboard.set_duration(DurationRange::new(8, 20));
                let _ = dashboard.toggle_tag("science");
                let _ = dashboard.focus(&science);
                dashboard.finish();
                black_box(dashboard.svg(talkscope::ChartKind::Beeswarm).map(str::len));
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("layouts_json", |b| {
        b.iter(|| black_box(dashboard.layouts_json(false).map(|s| s.len()).unwrap_or(0)))
    });
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_interactions);
criterion_main!(benches);
