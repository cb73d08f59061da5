//! Serializable chart layouts.
//!
//! Coordinates are in the chart's own SVG user space. Layouts are produced by the
//! `compute_*_layout` functions and consumed by the emitters in [`crate::svg`]; the CLI dumps them
//! as JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Outer SVG size.
    pub width: f64,
    pub height: f64,
    /// Translation of the plotting area.
    pub origin_x: f64,
    pub origin_y: f64,
    pub inner_width: f64,
    pub inner_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeswarmMark {
    pub talk_id: u64,
    pub x: f64,
    pub y: f64,
    pub headline: String,
    pub speaker: String,
    pub views: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeswarmLayout {
    pub frame: Frame,
    pub radius: f64,
    pub padding: f64,
    /// y of the views axis inside the plotting area.
    pub axis_y: f64,
    pub ticks: Vec<AxisTick>,
    /// Sorted by x.
    pub marks: Vec<BeeswarmMark>,
    pub empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordHighlight {
    /// No tag is selected.
    Neutral,
    Selected,
    NotSelected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordLabel {
    pub text: String,
    /// Mid-angle in radians, clockwise from 12 o'clock.
    pub angle: f64,
    pub transform: String,
    /// Past π the label is flipped and anchored at its end.
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordGroupLayout {
    pub index: usize,
    pub tag: String,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
    pub selected: bool,
    pub path: String,
    pub label: ChordLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordRibbonLayout {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub highlight: ChordHighlight,
    pub color: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordLayout {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub groups: Vec<ChordGroupLayout>,
    pub ribbons: Vec<ChordRibbonLayout>,
    pub selected: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub year: i32,
    pub count: u32,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    /// `All` or the tag name.
    pub name: String,
    pub color: String,
    /// One point per axis year, ascending.
    pub points: Vec<LinePoint>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartLayout {
    pub frame: Frame,
    pub y_max: f64,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub series: Vec<LineSeries>,
    pub legend: Vec<LegendEntry>,
    pub empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackNodeKind {
    Root,
    Broader,
    Categorized,
    Occupation,
    Talk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackNodeLayout {
    pub id: usize,
    pub parent: Option<usize>,
    pub name: String,
    pub kind: PackNodeKind,
    pub depth: usize,
    /// Number of talks below (or at) this node.
    pub talks: f64,
    /// Projected through the current zoom view.
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub fill: String,
    pub label_displayed: bool,
    pub label_opacity: f64,
    /// Set on leaves that stand for a single talk.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePackLayout {
    pub frame: Frame,
    /// `min-x min-y width height`, centred on the origin.
    pub view_box: [f64; 4],
    pub focus: usize,
    pub focus_path: Vec<String>,
    pub view: [f64; 3],
    pub animating: bool,
    /// Pre-order: parents before children.
    pub nodes: Vec<PackNodeLayout>,
    pub empty: bool,
}
