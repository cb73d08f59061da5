use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let fixture = repo_root().join("fixtures").join("talks").join("sample.csv");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());
    fixture
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("talkscope-cli"));
    cmd.current_dir(repo_root());
    cmd
}

#[test]
fn catalog_lists_ranked_tags() {
    let output = cli()
        .args(["catalog", fixture().to_string_lossy().as_ref()])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["talks"], 24);
    assert_eq!(value["duration"], serde_json::json!({"min": 4, "max": 25}));
    assert_eq!(value["tags"][0]["name"], "culture");
    assert_eq!(value["tags"][0]["count"], 9);
}

#[test]
fn layout_applies_the_script() {
    let output = cli()
        .args([
            "layout",
            "--duration",
            "10:20",
            "--tag",
            "science",
            "--focus",
            "Science",
            fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["selection"]["tags"], serde_json::json!(["science"]));
    // Science talks of 10-20 minutes: 1, 2 and 5.
    assert_eq!(value["beeswarm"]["marks"].as_array().map(|m| m.len()), Some(3));
    assert_eq!(
        value["circlePack"]["focus_path"],
        serde_json::json!(["Science"])
    );
}

#[test]
fn render_writes_every_chart() {
    let tmp = tempfile::tempdir().expect("tempdir");
    cli()
        .args([
            "render",
            "--out-dir",
            tmp.path().to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    for name in ["circle-pack", "beeswarm", "line-chart", "chord"] {
        let svg = fs::read_to_string(tmp.path().join(format!("{name}.svg"))).expect("svg written");
        assert!(svg.starts_with("<svg"), "{name} is not an svg");
    }
}

#[test]
fn render_single_chart_to_stdout() {
    let output = cli()
        .args([
            "render",
            "--chart",
            "beeswarm",
            fixture().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let svg = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(svg.matches("class=\"bee-mark\"").count(), 24);
}

#[test]
fn render_png() {
    let tmp = tempfile::tempdir().expect("tempdir");
    cli()
        .args([
            "render",
            "--chart",
            "chord",
            "--format",
            "png",
            "--scale",
            "0.5",
            "--out-dir",
            tmp.path().to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(tmp.path().join("chord.png")).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
}

#[test]
fn bad_arguments_exit_with_usage() {
    cli().args(["render", "--format", "gif"]).assert().code(2);
    cli().args(["layout", "--duration", "ten"]).assert().code(2);
    cli().args(["--bogus"]).assert().code(2);
}

#[test]
fn failures_exit_with_one() {
    cli()
        .args([
            "layout",
            "--tag",
            "astrology",
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);
    cli()
        .args(["catalog", "does/not/exist.csv"])
        .assert()
        .code(1);
}
