#![forbid(unsafe_code)]

//! `talkscope` is a headless dashboard over talk metadata.
//!
//! Four coordinated charts share one filtered data set: a zoomable occupation circle pack, a
//! beeswarm of view counts, a talks-per-year line chart and a tag co-occurrence chord diagram.
//! [`Dashboard`] owns the coordinator and the four chart adapters and routes user gestures
//! between them.
//!
//! # Features
//!
//! - `raster`: enable PNG output via pure-Rust SVG rasterization (`talkscope::raster`)

pub use talkscope_core::*;

mod dashboard;

pub use dashboard::{Dashboard, DashboardLayouts, Interaction};

/// Chart layouts, adapters and SVG emitters.
pub mod render {
    pub use talkscope_render::model::*;
    pub use talkscope_render::svg::{
        render_beeswarm_svg, render_chord_svg, render_circle_pack_svg, render_line_chart_svg,
    };
    pub use talkscope_render::{
        BeeswarmChart, BeeswarmConfig, ChordConfig, ChordDiagram, CirclePackChart,
        CirclePackConfig, EMPTY_MESSAGE, LineChart, LineChartConfig, SvgSurface,
        compute_beeswarm_layout, compute_chord_layout, compute_circle_pack_layout,
        compute_line_chart_layout, pack_occupations,
    };
}

#[cfg(feature = "raster")]
pub mod raster;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Core(#[from] talkscope_core::Error),
    #[error(transparent)]
    Render(#[from] talkscope_render::Error),
    #[error(transparent)]
    Layout(#[from] honeycomb::Error),
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
