use chrono::NaiveDate;
use std::path::PathBuf;
use talkscope_core::{
    ChartAdapter, ChartUpdate, CooccurrenceMatrix, Dataset, OccupationPath, TagCatalog,
    TalkRecord, UpdateCause, load_csv_path,
};
use talkscope_render::svg::{
    render_beeswarm_svg, render_chord_svg, render_circle_pack_svg, render_line_chart_svg,
};
use talkscope_render::{
    BeeswarmChart, BeeswarmConfig, ChordConfig, ChordDiagram, CirclePackChart, CirclePackConfig,
    LineChart, LineChartConfig, compute_beeswarm_layout, compute_chord_layout,
    compute_line_chart_layout,
};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn fixture() -> Dataset {
    load_csv_path(workspace_root().join("fixtures").join("talks").join("sample.csv"))
        .expect("fixture loads")
}

fn count_class(doc: &roxmltree::Document<'_>, tag: &str, class: &str) -> usize {
    doc.descendants()
        .filter(|n| n.has_tag_name(tag))
        .filter(|n| {
            n.attribute("class")
                .is_some_and(|c| c.split_whitespace().any(|p| p == class))
        })
        .count()
}

#[test]
fn every_chart_emits_well_formed_svg() {
    let dataset = fixture();
    let catalog = TagCatalog::from_records(dataset.records(), 50);
    let matrix = CooccurrenceMatrix::from_records(dataset.records(), &catalog);
    let records: Vec<&TalkRecord> = dataset.records().iter().collect();
    let root = OccupationPath::root();
    let selected = vec!["culture".to_string()];
    let update = ChartUpdate {
        cause: UpdateCause::Initial,
        records: &records,
        matrix: Some(&matrix),
        catalog: &catalog,
        selected_tags: &selected,
        path: &root,
    };

    let mut pack = CirclePackChart::new(CirclePackConfig::default());
    let mut beeswarm = BeeswarmChart::new(BeeswarmConfig::default());
    let mut line = LineChart::new(LineChartConfig::default());
    let mut chord = ChordDiagram::new(ChordConfig::default());
    pack.set_data(&update).expect("pack");
    beeswarm.set_data(&update).expect("beeswarm");
    line.set_data(&update).expect("line");
    chord.set_data(&update).expect("chord");

    let svg = beeswarm.surface().svg().expect("drawn");
    let doc = roxmltree::Document::parse(svg).expect("beeswarm svg parses");
    assert_eq!(count_class(&doc, "circle", "bee-mark"), 24);
    assert_eq!(count_class(&doc, "g", "tick"), 6);

    let svg = line.surface().svg().expect("drawn");
    let doc = roxmltree::Document::parse(svg).expect("line svg parses");
    assert_eq!(count_class(&doc, "path", "chart-line"), 1);
    assert_eq!(count_class(&doc, "circle", "circle-mark"), 11);
    assert_eq!(count_class(&doc, "circle", "legend-mark"), 1);

    let svg = chord.surface().svg().expect("drawn");
    let doc = roxmltree::Document::parse(svg).expect("chord svg parses");
    assert_eq!(count_class(&doc, "path", "arc"), catalog.len());
    assert_eq!(count_class(&doc, "text", "arc-label"), catalog.len());
    assert_eq!(count_class(&doc, "text", "selected"), 1);
    assert!(count_class(&doc, "path", "selected") > 0);
    assert!(count_class(&doc, "path", "notSelected") > 0);

    let svg = pack.surface().svg().expect("drawn");
    let doc = roxmltree::Document::parse(svg).expect("pack svg parses");
    let root_el = doc.root_element();
    assert_eq!(root_el.attribute("viewBox"), Some("-300 -300 600 600"));
    assert_eq!(
        count_class(&doc, "circle", "cp-circle"),
        pack.packed().expect("packed").hierarchy.len()
    );
    assert_eq!(count_class(&doc, "text", "cp-text"), 4);
}

#[test]
fn text_is_escaped() {
    let published = NaiveDate::from_ymd_opt(2012, 5, 1).expect("date");
    let record = TalkRecord::new(
        7,
        "Rock & <roll>",
        "Jo \"JJ\" O'Neil",
        ["Arts & Crafts", "Music", "Singer"],
        2_000_000,
        12,
        published,
        ["music", "fun & games"],
        "https://talks.example/7?a=1&b=2",
    );
    let records = vec![&record];
    let catalog = TagCatalog::from_records(std::slice::from_ref(&record), 50);
    let matrix = CooccurrenceMatrix::from_records([&record], &catalog);

    let beeswarm = compute_beeswarm_layout(&records, &BeeswarmConfig::default()).expect("layout");
    let svg = render_beeswarm_svg(&beeswarm);
    assert!(svg.contains("Rock &amp; &lt;roll&gt;"));
    assert!(svg.contains("Jo &quot;JJ&quot; O&#39;Neil"));
    roxmltree::Document::parse(&svg).expect("beeswarm svg parses");

    let chord = compute_chord_layout(&matrix, &catalog, &[], &ChordConfig::default());
    let svg = render_chord_svg(&chord);
    assert!(svg.contains("fun &amp; games"));
    roxmltree::Document::parse(&svg).expect("chord svg parses");

    let tags = vec!["fun & games".to_string()];
    let line = compute_line_chart_layout(&records, &tags, &catalog, &LineChartConfig::default());
    let svg = render_line_chart_svg(&line);
    roxmltree::Document::parse(&svg).expect("line svg parses");

    let mut pack = CirclePackChart::new(CirclePackConfig::default());
    let root = OccupationPath::root();
    pack.set_data(&ChartUpdate {
        cause: UpdateCause::Initial,
        records: &records,
        matrix: None,
        catalog: &catalog,
        selected_tags: &[],
        path: &root,
    })
    .expect("pack");
    let svg = render_circle_pack_svg(pack.layout().expect("layout"));
    assert!(svg.contains("Arts &amp; Crafts"));
    assert!(svg.contains("data-url=\"https://talks.example/7?a=1&amp;b=2\""));
    roxmltree::Document::parse(&svg).expect("pack svg parses");
}
