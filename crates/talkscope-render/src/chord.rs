//! Tag co-occurrence chord diagram.
//!
//! [`chord_layout`] turns a symmetric matrix into group arcs (one per tag, extent proportional to
//! the row sum) and chords (one per non-zero pair). Groups run clockwise from 12 o'clock in
//! matrix order, separated by a fixed pad angle; inside each group the subgroups are ordered by
//! descending value.

use crate::model::{ChordGroupLayout, ChordHighlight, ChordLabel, ChordLayout, ChordRibbonLayout};
use crate::surface::SvgSurface;
use crate::svg::path::{annular_sector, ribbon};
use crate::{chart_error, svg};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use talkscope_core::{
    ChartAdapter, ChartKind, ChartUpdate, CooccurrenceMatrix, DashboardConfig, DashboardEvent,
    Gesture, GestureOutcome, TagCatalog, TagRef,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordArc {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    /// The side with the larger value (ties keep the lower index).
    pub source: ChordArc,
    pub target: ChordArc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordGeometry {
    pub groups: Vec<ChordArc>,
    /// Ordered by `(min index, max index)`.
    pub chords: Vec<Chord>,
}

pub fn chord_layout(matrix: &CooccurrenceMatrix, pad_angle: f64) -> ChordGeometry {
    let n = matrix.size();
    if n == 0 {
        return ChordGeometry::default();
    }
    let value = |i: usize, j: usize| f64::from(matrix.get(i, j));

    let sums = (0..n).map(|i| matrix.row_sum(i) as f64).collect::<Vec<_>>();
    let total = sums.iter().sum::<f64>();
    let (k, dx) = if total > 0.0 {
        ((TAU - pad_angle * n as f64).max(0.0) / total, pad_angle)
    } else {
        (0.0, TAU / n as f64)
    };

    let mut halves: Vec<(Option<ChordArc>, Option<ChordArc>)> = vec![(None, None); n * n];
    let mut groups = Vec::with_capacity(n);
    let mut x = 0.0;
    for i in 0..n {
        let x0 = x;
        let mut subgroups = (0..n)
            .filter(|&j| value(i, j) != 0.0 || value(j, i) != 0.0)
            .collect::<Vec<_>>();
        subgroups.sort_by(|&a, &b| value(i, b).total_cmp(&value(i, a)));

        for j in subgroups {
            let v = value(i, j);
            let arc = ChordArc {
                index: i,
                start_angle: x,
                end_angle: x + v * k,
                value: v,
            };
            x = arc.end_angle;
            let slot = &mut halves[i.min(j) * n + i.max(j)];
            if i < j {
                slot.0 = Some(arc);
            } else {
                slot.1 = Some(arc);
                if i == j {
                    slot.0 = Some(arc);
                }
            }
        }
        groups.push(ChordArc {
            index: i,
            start_angle: x0,
            end_angle: x,
            value: sums[i],
        });
        x += dx;
    }

    let chords = halves
        .into_iter()
        .filter_map(|(a, b)| {
            let (source, target) = (a?, b?);
            Some(if source.value < target.value {
                Chord {
                    source: target,
                    target: source,
                }
            } else {
                Chord { source, target }
            })
        })
        .collect();

    ChordGeometry { groups, chords }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChordConfig {
    pub width: f64,
    pub height: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub pad_angle: f64,
    pub label_offset: f64,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            inner_radius: 200.0,
            outer_radius: 210.0,
            pad_angle: 0.05,
            label_offset: 15.0,
        }
    }
}

impl ChordConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let d = Self::default();
        let f = |key: &str, fallback: f64| {
            config
                .get_f64(&format!("chord.{key}"))
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(fallback)
        };
        let inner_radius = f("innerRadius", d.inner_radius);
        Self {
            width: f("width", d.width),
            height: f("height", d.height),
            inner_radius,
            outer_radius: f("outerRadius", d.outer_radius).max(inner_radius),
            pad_angle: f("padAngle", d.pad_angle),
            label_offset: f("labelOffset", d.label_offset),
        }
    }
}

fn label_for(text: &str, group: &ChordArc, radius: f64) -> ChordLabel {
    let angle = (group.start_angle + group.end_angle) / 2.0;
    let flipped = angle > PI;
    let mut transform = format!(
        "rotate({}) translate({})",
        svg::util::fmt(angle * 180.0 / PI - 90.0),
        svg::util::fmt(radius)
    );
    if flipped {
        transform.push_str(" rotate(180)");
    }
    ChordLabel {
        text: text.to_string(),
        angle,
        transform,
        flipped,
    }
}

/// Places the matrix on the circle and applies the selection highlight.
///
/// Chords touching a selected tag are `selected`; with a non-empty selection all others are
/// `not-selected`. A chord takes its target's color when the target is selected, else its source's.
pub fn compute_chord_layout(
    matrix: &CooccurrenceMatrix,
    catalog: &TagCatalog,
    selected_tags: &[String],
    config: &ChordConfig,
) -> ChordLayout {
    let geometry = chord_layout(matrix, config.pad_angle);
    let selected = selected_tags
        .iter()
        .filter_map(|t| catalog.index_of(t))
        .collect::<Vec<_>>();
    let color = |index: usize| {
        catalog
            .get(index)
            .map(|t| t.color)
            .unwrap_or(talkscope_core::PALETTE[0])
            .to_string()
    };

    let label_radius = config.inner_radius + config.label_offset;
    let groups = geometry
        .groups
        .iter()
        .map(|g| {
            let tag = catalog
                .get(g.index)
                .map(|t| t.name.clone())
                .unwrap_or_default();
            ChordGroupLayout {
                index: g.index,
                color: color(g.index),
                start_angle: g.start_angle,
                end_angle: g.end_angle,
                value: g.value,
                selected: selected.contains(&g.index),
                path: annular_sector(
                    config.inner_radius,
                    config.outer_radius,
                    g.start_angle,
                    g.end_angle,
                ),
                label: label_for(&tag, g, label_radius),
                tag,
            }
        })
        .collect();

    let ribbons = geometry
        .chords
        .iter()
        .map(|c| {
            let touches = selected.contains(&c.source.index) || selected.contains(&c.target.index);
            let highlight = match (selected.is_empty(), touches) {
                (true, _) => ChordHighlight::Neutral,
                (false, true) => ChordHighlight::Selected,
                (false, false) => ChordHighlight::NotSelected,
            };
            let colored_by = if selected.contains(&c.target.index) {
                c.target.index
            } else {
                c.source.index
            };
            ChordRibbonLayout {
                source: c.source.index,
                target: c.target.index,
                value: c.source.value,
                highlight,
                color: color(colored_by),
                path: ribbon(
                    config.inner_radius,
                    (c.source.start_angle, c.source.end_angle),
                    (c.target.start_angle, c.target.end_angle),
                ),
            }
        })
        .collect();

    ChordLayout {
        width: config.width,
        height: config.height,
        center_x: config.width / 2.0,
        center_y: config.height / 2.0,
        inner_radius: config.inner_radius,
        outer_radius: config.outer_radius,
        groups,
        ribbons,
        selected,
    }
}

#[derive(Debug, Clone)]
pub struct ChordDiagram {
    config: ChordConfig,
    matrix: CooccurrenceMatrix,
    layout: Option<ChordLayout>,
    surface: SvgSurface,
}

impl ChordDiagram {
    pub fn new(config: ChordConfig) -> Self {
        Self {
            config,
            matrix: CooccurrenceMatrix::zeros(0),
            layout: None,
            surface: SvgSurface::new(),
        }
    }

    pub fn config(&self) -> &ChordConfig {
        &self.config
    }

    /// The matrix currently drawn.
    pub fn matrix(&self) -> &CooccurrenceMatrix {
        &self.matrix
    }

    pub fn layout(&self) -> Option<&ChordLayout> {
        self.layout.as_ref()
    }

    pub fn surface(&self) -> &SvgSurface {
        &self.surface
    }
}

impl ChartAdapter for ChordDiagram {
    fn kind(&self) -> ChartKind {
        ChartKind::Chord
    }

    fn set_data(&mut self, update: &ChartUpdate<'_>) -> talkscope_core::Result<()> {
        if let Some(matrix) = update.matrix {
            self.matrix = matrix.clone();
        }
        if self.matrix.size() != update.catalog.len() {
            return Err(chart_error(
                ChartKind::Chord,
                crate::Error::InvalidModel {
                    message: format!(
                        "matrix has {} rows for {} catalog tags",
                        self.matrix.size(),
                        update.catalog.len()
                    ),
                },
            ));
        }
        let layout =
            compute_chord_layout(&self.matrix, update.catalog, update.selected_tags, &self.config);
        debug!(
            recomputed = update.matrix.is_some(),
            ribbons = layout.ribbons.len(),
            selected = layout.selected.len(),
            "chord layout"
        );
        self.surface.draw(svg::render_chord_svg(&layout));
        self.layout = Some(layout);
        Ok(())
    }

    fn gesture(&mut self, gesture: &Gesture) -> GestureOutcome {
        match gesture {
            Gesture::Tag { index } if *index < self.matrix.size() => {
                GestureOutcome::Publish(DashboardEvent::TagClicked {
                    tag: TagRef::Index(*index),
                })
            }
            _ => GestureOutcome::Ignored,
        }
    }
}
