//! Talks per publication year, as one line for all talks or one line per selected tag.

use crate::model::{AxisTick, Frame, LegendEntry, LineChartLayout, LinePoint, LineSeries};
use crate::scale::LinearScale;
use crate::surface::SvgSurface;
use crate::svg;
use crate::svg::path::polyline;
use rustc_hash::FxHashMap;
use talkscope_core::{
    ChartAdapter, ChartKind, ChartUpdate, DashboardConfig, Gesture, GestureOutcome, Margin,
    TagCatalog, TalkRecord,
};
use tracing::debug;

/// Name of the series drawn when no tag is selected.
pub const ALL_SERIES: &str = "All";
pub const ALL_SERIES_COLOR: &str = "#333333";

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub first_year: i32,
    pub last_year: i32,
    /// Added above the largest count.
    pub headroom: f64,
    /// y maximum when there is nothing to draw.
    pub empty_max: f64,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            margin: Margin {
                top: 40.0,
                right: 30.0,
                bottom: 30.0,
                left: 50.0,
            },
            first_year: 2007,
            last_year: 2017,
            headroom: 15.0,
            empty_max: 180.0,
        }
    }
}

impl LineChartConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let d = Self::default();
        let f = |key: &str, fallback: f64| {
            config
                .get_f64(&format!("lineChart.{key}"))
                .filter(|v| v.is_finite())
                .unwrap_or(fallback)
        };
        let year = |key: &str, fallback: i32| {
            config
                .get(&format!("lineChart.{key}"))
                .and_then(|v| v.as_i64())
                .and_then(|v| i32::try_from(v).ok())
                .unwrap_or(fallback)
        };
        let first_year = year("firstYear", d.first_year);
        Self {
            width: f("width", d.width),
            height: f("height", d.height),
            margin: Margin::read(config, "lineChart", d.margin),
            first_year,
            last_year: year("lastYear", d.last_year).max(first_year),
            headroom: f("headroom", d.headroom).max(0.0),
            empty_max: f("emptyMax", d.empty_max).max(1.0),
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year
    }

    fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            origin_x: self.margin.left,
            origin_y: self.margin.top - 10.0,
            inner_width: (self.width - self.margin.left - self.margin.right).max(0.0),
            inner_height: (self.height - self.margin.top - self.margin.bottom).max(0.0),
        }
    }
}

/// Counts `records` per year over `years`, in order. Years without talks count 0; talks outside
/// the range are not counted.
pub fn yearly_counts<'a>(
    records: impl IntoIterator<Item = &'a TalkRecord>,
    years: impl IntoIterator<Item = i32>,
) -> Vec<(i32, u32)> {
    let mut by_year: FxHashMap<i32, u32> = FxHashMap::default();
    for record in records {
        *by_year.entry(record.year).or_insert(0) += 1;
    }
    years
        .into_iter()
        .map(|year| (year, by_year.get(&year).copied().unwrap_or(0)))
        .collect()
}

pub fn compute_line_chart_layout(
    records: &[&TalkRecord],
    selected_tags: &[String],
    catalog: &TagCatalog,
    config: &LineChartConfig,
) -> LineChartLayout {
    let frame = config.frame();
    let empty = records.is_empty();

    let counted: Vec<(String, String, Vec<(i32, u32)>)> = if selected_tags.is_empty() {
        vec![(
            ALL_SERIES.to_string(),
            ALL_SERIES_COLOR.to_string(),
            yearly_counts(records.iter().copied(), config.years()),
        )]
    } else {
        selected_tags
            .iter()
            .map(|tag| {
                let color = catalog.color_of(tag).unwrap_or(ALL_SERIES_COLOR);
                let counts = yearly_counts(
                    records.iter().copied().filter(|r| r.has_tag(tag)),
                    config.years(),
                );
                (tag.clone(), color.to_string(), counts)
            })
            .collect()
    };

    let max = counted
        .iter()
        .flat_map(|(_, _, counts)| counts.iter().map(|(_, c)| *c))
        .max()
        .unwrap_or(0);
    let y_max = if empty {
        config.empty_max
    } else {
        f64::from(max) + config.headroom
    };

    let x = LinearScale::new(
        (f64::from(config.first_year), f64::from(config.last_year)),
        (0.0, frame.inner_width),
    );
    let y = LinearScale::new((0.0, y_max), (frame.inner_height, 0.0));

    let series = if empty {
        Vec::new()
    } else {
        counted
            .into_iter()
            .map(|(name, color, counts)| {
                let points = counts
                    .into_iter()
                    .map(|(year, count)| LinePoint {
                        year,
                        count,
                        x: x.apply(f64::from(year)),
                        y: y.apply(f64::from(count)),
                    })
                    .collect::<Vec<_>>();
                let path = polyline(points.iter().map(|p| (p.x, p.y)));
                LineSeries {
                    name,
                    color,
                    points,
                    path,
                }
            })
            .collect()
    };

    let legend = if selected_tags.is_empty() {
        if empty {
            Vec::new()
        } else {
            vec![LegendEntry {
                label: "All talks".to_string(),
                color: ALL_SERIES_COLOR.to_string(),
                x: 150.0,
                y: 10.0,
            }]
        }
    } else {
        selected_tags
            .iter()
            .enumerate()
            .map(|(i, tag)| LegendEntry {
                label: tag.clone(),
                color: catalog
                    .color_of(tag)
                    .unwrap_or(ALL_SERIES_COLOR)
                    .to_string(),
                x: i as f64 * 170.0 + 110.0,
                y: 10.0,
            })
            .collect()
    };

    let x_ticks = config
        .years()
        .map(|year| AxisTick {
            value: f64::from(year),
            position: x.apply(f64::from(year)),
            label: year.to_string(),
        })
        .collect();
    let y_ticks = y
        .ticks(10)
        .into_iter()
        .map(|v| AxisTick {
            value: v,
            position: y.apply(v),
            label: format!("{v:.0}"),
        })
        .collect();

    LineChartLayout {
        frame,
        y_max,
        x_ticks,
        y_ticks,
        series,
        legend,
        empty,
    }
}

#[derive(Debug, Clone)]
pub struct LineChart {
    config: LineChartConfig,
    layout: Option<LineChartLayout>,
    surface: SvgSurface,
}

impl LineChart {
    pub fn new(config: LineChartConfig) -> Self {
        Self {
            config,
            layout: None,
            surface: SvgSurface::new(),
        }
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&LineChartLayout> {
        self.layout.as_ref()
    }

    pub fn surface(&self) -> &SvgSurface {
        &self.surface
    }
}

impl ChartAdapter for LineChart {
    fn kind(&self) -> ChartKind {
        ChartKind::LineChart
    }

    fn set_data(&mut self, update: &ChartUpdate<'_>) -> talkscope_core::Result<()> {
        let layout = compute_line_chart_layout(
            update.records,
            update.selected_tags,
            update.catalog,
            &self.config,
        );
        debug!(
            talks = update.records.len(),
            series = layout.series.len(),
            y_max = layout.y_max,
            "line chart layout"
        );
        self.surface.draw(svg::render_line_chart_svg(&layout));
        self.layout = Some(layout);
        Ok(())
    }

    fn gesture(&mut self, _gesture: &Gesture) -> GestureOutcome {
        GestureOutcome::Ignored
    }
}
