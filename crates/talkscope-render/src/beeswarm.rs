//! Views beeswarm: one dot per talk on a log-scaled views axis, dodged upward off the axis.

use crate::model::{AxisTick, BeeswarmLayout, BeeswarmMark, Frame};
use crate::scale::{LogScale, group_thousands};
use crate::surface::SvgSurface;
use crate::{Result, chart_error, svg};
use honeycomb::{DodgeOptions, dodge};
use talkscope_core::{
    ChartAdapter, ChartKind, ChartUpdate, DashboardConfig, Gesture, GestureOutcome, Margin,
    TalkRecord,
};
use tracing::debug;

/// Fixed views axis ticks.
pub const TICK_VALUES: [u64; 6] = [100_000, 500_000, 1_000_000, 5_000_000, 10_000_000, 50_000_000];

#[derive(Debug, Clone, PartialEq)]
pub struct BeeswarmConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub padding: f64,
    pub views_min: f64,
    pub views_max: f64,
}

impl Default for BeeswarmConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 420.0,
            margin: Margin {
                top: 20.0,
                right: 30.0,
                bottom: 20.0,
                left: 20.0,
            },
            padding: 1.5,
            views_min: 100_000.0,
            views_max: 50_000_000.0,
        }
    }
}

impl BeeswarmConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let d = Self::default();
        let f = |key: &str, fallback: f64| {
            config
                .get_f64(&format!("beeswarm.{key}"))
                .filter(|v| v.is_finite())
                .unwrap_or(fallback)
        };
        let views_min = f("viewsMin", d.views_min).max(1.0);
        Self {
            width: f("width", d.width),
            height: f("height", d.height),
            margin: Margin::read(config, "beeswarm", d.margin),
            padding: f("padding", d.padding).max(0.0),
            views_min,
            views_max: f("viewsMax", d.views_max).max(views_min * 10.0),
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            origin_x: self.margin.left,
            origin_y: self.margin.top,
            inner_width: (self.width - self.margin.left - self.margin.right).max(0.0),
            inner_height: (self.height - self.margin.top - self.margin.bottom).max(0.0),
        }
    }
}

/// Dot radius for a data set of `n` talks: smaller dots for larger sets.
pub fn radius_for_count(n: usize) -> f64 {
    if n > 1000 {
        2.0
    } else if n > 850 {
        2.6
    } else {
        3.0
    }
}

pub fn compute_beeswarm_layout(
    records: &[&TalkRecord],
    config: &BeeswarmConfig,
) -> Result<BeeswarmLayout> {
    let frame = config.frame();
    let scale = LogScale::new(
        (config.views_min, config.views_max),
        (0.0, frame.inner_width),
    );
    let radius = radius_for_count(records.len());
    let axis_y = frame.inner_height - config.margin.bottom;

    let placed = dodge(
        records,
        |r| scale.apply(r.views.max(1) as f64),
        &DodgeOptions::new(radius, config.padding),
    )?;
    let marks = placed
        .iter()
        .map(|c| {
            let record = records[c.index];
            BeeswarmMark {
                talk_id: record.id,
                x: c.x,
                y: axis_y - radius - config.padding - c.y,
                headline: record.headline.clone(),
                speaker: record.speaker_1.clone(),
                views: record.views,
                url: record.public_url.clone(),
            }
        })
        .collect::<Vec<_>>();

    let ticks = TICK_VALUES
        .iter()
        .map(|&v| AxisTick {
            value: v as f64,
            position: scale.apply(v as f64),
            label: group_thousands(v),
        })
        .collect();

    debug!(talks = records.len(), radius, "beeswarm layout");
    Ok(BeeswarmLayout {
        frame,
        radius,
        padding: config.padding,
        axis_y,
        ticks,
        empty: marks.is_empty(),
        marks,
    })
}

#[derive(Debug, Clone)]
pub struct BeeswarmChart {
    config: BeeswarmConfig,
    layout: Option<BeeswarmLayout>,
    surface: SvgSurface,
}

impl BeeswarmChart {
    pub fn new(config: BeeswarmConfig) -> Self {
        Self {
            config,
            layout: None,
            surface: SvgSurface::new(),
        }
    }

    pub fn config(&self) -> &BeeswarmConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&BeeswarmLayout> {
        self.layout.as_ref()
    }

    pub fn surface(&self) -> &SvgSurface {
        &self.surface
    }
}

impl ChartAdapter for BeeswarmChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Beeswarm
    }

    fn set_data(&mut self, update: &ChartUpdate<'_>) -> talkscope_core::Result<()> {
        let layout = compute_beeswarm_layout(update.records, &self.config)
            .map_err(|e| chart_error(ChartKind::Beeswarm, e))?;
        self.surface.draw(svg::render_beeswarm_svg(&layout));
        self.layout = Some(layout);
        Ok(())
    }

    fn gesture(&mut self, gesture: &Gesture) -> GestureOutcome {
        let Gesture::Mark { index } = gesture else {
            return GestureOutcome::Ignored;
        };
        self.layout
            .as_ref()
            .and_then(|l| l.marks.get(*index))
            .map(|m| GestureOutcome::OpenUrl(m.url.clone()))
            .unwrap_or(GestureOutcome::Ignored)
    }
}
