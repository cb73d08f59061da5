use super::{generated, ids, talk, talk_in};
use crate::filter::{chord_view, duration_tag_stage, occupation_stage, surviving_prefix};
use crate::*;

#[test]
fn duration_stage_is_inclusive() {
    let records = vec![talk(1, 5, &["a"]), talk(2, 20, &["a"]), talk(3, 40, &["a"])];
    let out = duration_tag_stage(&records, &DurationRange::new(5, 20), &[]);
    assert_eq!(ids(&out), vec![1, 2]);
}

#[test]
fn tag_predicate_is_a_logical_or() {
    let records = vec![
        talk(1, 10, &["a"]),
        talk(2, 10, &["b"]),
        talk(3, 10, &["c"]),
        talk(4, 10, &["a", "c"]),
    ];
    let selected = ["a".to_string(), "b".to_string()];
    let out = duration_tag_stage(&records, &DurationRange::new(0, 60), &selected);
    assert_eq!(ids(&out), vec![1, 2, 4]);
}

#[test]
fn duration_tag_stage_is_idempotent() {
    let records = generated(200, 9);
    let range = DurationRange::new(10, 30);
    let tags = ["design".to_string(), "music".to_string()];
    let once = duration_tag_stage(&records, &range, &tags)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let twice = duration_tag_stage(&once, &range, &tags);
    assert_eq!(ids(&twice), once.iter().map(|r| r.id).collect::<Vec<_>>());
}

#[test]
fn narrowing_the_duration_never_grows_the_result() {
    let records = generated(300, 4);
    let tags = ["science".to_string()];
    let mut previous = usize::MAX;
    for (min, max) in [(2, 45), (5, 40), (10, 35), (15, 30), (20, 25), (22, 22)] {
        let n = duration_tag_stage(&records, &DurationRange::new(min, max), &tags).len();
        assert!(n <= previous, "[{min},{max}] grew to {n}");
        previous = n;
    }
}

#[test]
fn occupation_depths_nest() {
    let records = generated(300, 21);
    let all = duration_tag_stage(&records, &DurationRange::new(0, 100), &[]);
    let path3 = OccupationPath::new(["Arts", "Music", "Singer"]).unwrap();

    let mut previous = ids(&all);
    for depth in 1..=3 {
        let current = ids(&occupation_stage(&all, &path3.prefix(depth)));
        assert!(current.iter().all(|id| previous.contains(id)), "depth {depth}");
        assert!(!current.is_empty());
        previous = current;
    }
}

#[test]
fn depth_two_requires_both_levels() {
    let records = vec![
        talk_in(1, 10, &["a"], ["Science", "Music", "x"]),
        talk_in(2, 10, &["a"], ["Arts", "Music", "x"]),
    ];
    let all = records.iter().collect::<Vec<_>>();
    let path = OccupationPath::new(["Arts", "Music"]).unwrap();
    assert_eq!(ids(&occupation_stage(&all, &path)), vec![2]);
    assert_eq!(ids(&occupation_stage(&all, &OccupationPath::root())), vec![1, 2]);
}

#[test]
fn chord_view_ignores_selected_tags() {
    let records = vec![talk(1, 10, &["a"]), talk(2, 10, &["b"])];
    let view = chord_view(&records, &DurationRange::new(0, 60), &OccupationPath::root());
    assert_eq!(ids(&view), vec![1, 2]);
}

#[test]
fn surviving_prefix_drops_missing_levels() {
    let records = vec![talk_in(1, 10, &["a"], ["Science", "Physics", "Physicist"])];
    let all = records.iter().collect::<Vec<_>>();
    let path = OccupationPath::new(["Science", "Biology", "Biologist"]).unwrap();
    assert_eq!(
        surviving_prefix(&all, &path),
        OccupationPath::new(["Science"]).unwrap()
    );
    assert_eq!(surviving_prefix(&[], &path), OccupationPath::root());
}

#[test]
fn catalog_is_stable_across_rebuilds() {
    let records = generated(250, 17);
    let a = TagCatalog::from_records(&records, 50);
    let b = TagCatalog::from_records(&records, 50);
    assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    for tag in a.iter() {
        assert_eq!(tag.color, PALETTE[tag.rank]);
    }
}

#[test]
fn cooccurrence_is_symmetric_for_generated_data() {
    let records = generated(250, 33);
    let catalog = TagCatalog::from_records(&records, 50);
    let m = CooccurrenceMatrix::from_records(&records, &catalog);
    for i in 0..m.size() {
        assert_eq!(m.get(i, i), 0);
        for j in 0..m.size() {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
    }
}
