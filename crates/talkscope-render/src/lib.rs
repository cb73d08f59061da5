#![forbid(unsafe_code)]

//! Chart layouts for the talkscope dashboard.
//!
//! Each chart is split the same way: a pure `compute_*_layout` function turning the records of a
//! [`talkscope_core::ChartUpdate`] into a serializable layout (see [`model`]), an SVG emitter in
//! [`svg`], and an adapter struct implementing [`talkscope_core::ChartAdapter`] that keeps the
//! last layout and its rendered [`SvgSurface`].

pub mod beeswarm;
pub mod chord;
pub mod circlepack;
pub mod linechart;
pub mod model;
pub mod scale;
pub mod surface;
pub mod svg;

pub use beeswarm::{BeeswarmChart, BeeswarmConfig, compute_beeswarm_layout, radius_for_count};
pub use chord::{
    Chord, ChordArc, ChordConfig, ChordDiagram, ChordGeometry, chord_layout, compute_chord_layout,
};
pub use circlepack::{
    CirclePackChart, CirclePackConfig, OccupationNode, OccupationNodeKind, PackedOccupations,
    build_occupation_hierarchy, compute_circle_pack_layout, pack_occupations,
};
pub use linechart::{LineChart, LineChartConfig, compute_line_chart_layout, yearly_counts};
pub use surface::SvgSurface;

use talkscope_core::ChartKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout failed: {0}")]
    Layout(#[from] honeycomb::Error),
    #[error("invalid chart input: {message}")]
    InvalidModel { message: String },
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wraps a render failure into the coordinator's error type, naming the chart.
pub fn chart_error(kind: ChartKind, err: Error) -> talkscope_core::Error {
    talkscope_core::Error::Chart {
        chart: kind.name().to_string(),
        message: err.to_string(),
    }
}

/// Shown by every chart whose filtered record set is empty.
pub const EMPTY_MESSAGE: &str = "No talks that meet your specifications";
