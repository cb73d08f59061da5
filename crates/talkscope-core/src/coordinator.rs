//! Cross-chart coordination.
//!
//! The [`Coordinator`] owns the data set, the tag catalog, the co-occurrence matrix and the
//! [`SelectionState`]. Charts never touch any of it directly: they receive [`ChartUpdate`]s and
//! answer gestures with a [`GestureOutcome`], which may carry an event for the [`EventBus`].
//!
//! Updates are pushed in dependency order (circle pack, beeswarm, line chart, chord). Stage-1
//! filtering, path truncation and the matrix recompute always happen before any chart is updated.

use crate::catalog::TagCatalog;
use crate::config::DashboardConfig;
use crate::cooccurrence::CooccurrenceMatrix;
use crate::event::{DashboardEvent, EventBus, TagRef};
use crate::filter::{
    DurationRange, OccupationPath, chord_view, duration_tag_stage, occupation_stage,
    surviving_prefix,
};
use crate::load::Dataset;
use crate::record::TalkRecord;
use crate::selection::{SelectionState, TagToggle};
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    CirclePack,
    Beeswarm,
    LineChart,
    Chord,
}

impl ChartKind {
    pub const DEPENDENCY_ORDER: [ChartKind; 4] = [
        ChartKind::CirclePack,
        ChartKind::Beeswarm,
        ChartKind::LineChart,
        ChartKind::Chord,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::CirclePack => "circle-pack",
            ChartKind::Beeswarm => "beeswarm",
            ChartKind::LineChart => "line-chart",
            ChartKind::Chord => "chord",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateCause {
    Initial,
    Duration,
    Tags,
    Occupation,
}

/// What a chart receives on every update.
#[derive(Debug, Clone, Copy)]
pub struct ChartUpdate<'a> {
    pub cause: UpdateCause,
    /// Circle pack: stage 1. Beeswarm and line chart: stage 1 + occupation. Chord: duration +
    /// occupation (no tag predicate).
    pub records: &'a [&'a TalkRecord],
    /// Chord only: `Some` when the matrix was recomputed, `None` for a highlight-only update.
    pub matrix: Option<&'a CooccurrenceMatrix>,
    pub catalog: &'a TagCatalog,
    pub selected_tags: &'a [String],
    pub path: &'a OccupationPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Chord arc or label, by catalog rank.
    Tag { index: usize },
    /// Circle-pack node, by hierarchy id.
    Node { id: usize },
    /// Empty chart background.
    Background,
    /// Beeswarm mark, by position in the chart's current layout.
    Mark { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Publish(DashboardEvent),
    OpenUrl(String),
}

/// A rendering surface driven by the coordinator.
pub trait ChartAdapter {
    fn kind(&self) -> ChartKind;

    /// Re-runs the chart's layout over `update` and redraws.
    fn set_data(&mut self, update: &ChartUpdate<'_>) -> Result<()>;

    fn gesture(&mut self, gesture: &Gesture) -> GestureOutcome;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub handled: Vec<DashboardEvent>,
    /// Charts updated, in update order.
    pub redraws: Vec<ChartKind>,
    pub matrix_recomputes: usize,
    /// Set when a filter change removed the focused occupation node.
    pub truncated_path: Option<OccupationPath>,
}

impl DispatchReport {
    fn absorb(&mut self, other: DispatchReport) {
        self.handled.extend(other.handled);
        self.redraws.extend(other.redraws);
        self.matrix_recomputes += other.matrix_recomputes;
        if other.truncated_path.is_some() {
            self.truncated_path = other.truncated_path;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FanOut {
    cause: UpdateCause,
    pack: bool,
    recompute_matrix: bool,
}

#[derive(Debug, Clone)]
pub struct Coordinator {
    dataset: Dataset,
    catalog: TagCatalog,
    matrix: CooccurrenceMatrix,
    selection: SelectionState,
    bus: EventBus,
}

impl Coordinator {
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Result<Self> {
        let tags = config.tags();
        let catalog = TagCatalog::from_records(dataset.records(), tags.top_n);

        let bounds = dataset.duration_bounds();
        let mut selection = SelectionState::new(bounds, tags.max_selected);
        let (min, max) = config.duration_overrides();
        selection.set_duration(min.unwrap_or(bounds.min), max.unwrap_or(bounds.max));

        let mut initial = Vec::with_capacity(tags.initial.len());
        for tag in tags.initial {
            if catalog.contains(&tag) {
                initial.push(tag);
            } else {
                warn!(%tag, "ignoring initial tag outside the catalog");
            }
        }
        selection.set_tags(&initial);

        let matrix = CooccurrenceMatrix::from_records(
            chord_view(dataset.records(), &selection.duration(), selection.path()),
            &catalog,
        );

        info!(
            talks = dataset.len(),
            tags = catalog.len(),
            duration = %selection.duration(),
            "dashboard coordinator ready"
        );

        Ok(Self {
            dataset,
            catalog,
            matrix,
            selection,
            bus: EventBus::new(),
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &CooccurrenceMatrix {
        &self.matrix
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pending_events(&self) -> usize {
        self.bus.len()
    }

    pub fn publish(&mut self, event: DashboardEvent) {
        debug!(event = event.name(), "event published");
        self.bus.publish(event);
    }

    /// Publishes a lower-bound change, corrected against the current upper bound.
    pub fn request_duration_min(&mut self, min: u32) {
        let mut next = self.selection.clone();
        next.set_duration_min(min);
        self.publish(DashboardEvent::DurationChanged {
            range: next.duration(),
        });
    }

    /// Publishes an upper-bound change, corrected against the current lower bound.
    pub fn request_duration_max(&mut self, max: u32) {
        let mut next = self.selection.clone();
        next.set_duration_max(max);
        self.publish(DashboardEvent::DurationChanged {
            range: next.duration(),
        });
    }

    /// Pushes the initial view into every chart.
    pub fn initialize(&mut self, charts: &mut [&mut dyn ChartAdapter]) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();
        self.fan_out(
            FanOut {
                cause: UpdateCause::Initial,
                pack: true,
                recompute_matrix: true,
            },
            charts,
            &mut report,
        )?;
        Ok(report)
    }

    /// Handles queued events until the bus is empty.
    ///
    /// On error the remaining queue is dropped so that a failed interaction cannot replay later.
    pub fn dispatch(&mut self, charts: &mut [&mut dyn ChartAdapter]) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();
        while let Some(event) = self.bus.pop() {
            debug!(event = event.name(), "handling event");
            if let Err(err) = self.handle(&event, charts, &mut report) {
                self.bus.clear();
                return Err(err);
            }
            report.handled.push(event);
        }
        Ok(report)
    }

    /// Forwards `gesture` to the chart of `kind` and dispatches whatever it publishes.
    pub fn route_gesture(
        &mut self,
        kind: ChartKind,
        gesture: &Gesture,
        charts: &mut [&mut dyn ChartAdapter],
    ) -> Result<(GestureOutcome, DispatchReport)> {
        let Some(chart) = charts.iter_mut().find(|c| c.kind() == kind) else {
            return Ok((GestureOutcome::Ignored, DispatchReport::default()));
        };
        let outcome = chart.gesture(gesture);
        let mut report = DispatchReport::default();
        if let GestureOutcome::Publish(event) = &outcome {
            self.publish(event.clone());
            report.absorb(self.dispatch(charts)?);
        }
        Ok((outcome, report))
    }

    fn resolve_tag(&self, tag: &TagRef) -> Result<String> {
        let resolved = match tag {
            TagRef::Index(i) => self.catalog.get(*i).map(|t| t.name.clone()),
            TagRef::Name(name) => self.catalog.contains(name).then(|| name.clone()),
        };
        resolved.ok_or_else(|| Error::UnknownTag {
            tag: match tag {
                TagRef::Index(i) => format!("#{i}"),
                TagRef::Name(name) => name.clone(),
            },
        })
    }

    fn handle(
        &mut self,
        event: &DashboardEvent,
        charts: &mut [&mut dyn ChartAdapter],
        report: &mut DispatchReport,
    ) -> Result<()> {
        match event {
            DashboardEvent::TagClicked { tag } => {
                let name = self.resolve_tag(tag)?;
                match self.selection.toggle_tag(&name) {
                    TagToggle::AddedWithEviction { evicted } => {
                        debug!(tag = %name, %evicted, "tag selected, oldest evicted");
                    }
                    toggle => debug!(tag = %name, ?toggle, "tag toggled"),
                }
                let tags = self.selection.tags().to_vec();
                self.publish(DashboardEvent::TagSelectionChanged { tags });
                Ok(())
            }
            DashboardEvent::TagSelectionChanged { tags } => {
                if let Some(unknown) = tags.iter().find(|t| !self.catalog.contains(t)) {
                    return Err(Error::UnknownTag {
                        tag: unknown.clone(),
                    });
                }
                self.selection.set_tags(tags);
                self.fan_out(
                    FanOut {
                        cause: UpdateCause::Tags,
                        pack: true,
                        recompute_matrix: false,
                    },
                    charts,
                    report,
                )
            }
            DashboardEvent::OccupationFocusChanged { path } => {
                self.selection.set_path(path.clone());
                self.fan_out(
                    FanOut {
                        cause: UpdateCause::Occupation,
                        pack: false,
                        recompute_matrix: true,
                    },
                    charts,
                    report,
                )
            }
            DashboardEvent::DurationChanged { range } => {
                self.selection.set_duration(range.min, range.max);
                self.fan_out(
                    FanOut {
                        cause: UpdateCause::Duration,
                        pack: true,
                        recompute_matrix: true,
                    },
                    charts,
                    report,
                )
            }
        }
    }

    fn fan_out(
        &mut self,
        plan: FanOut,
        charts: &mut [&mut dyn ChartAdapter],
        report: &mut DispatchReport,
    ) -> Result<()> {
        let records = self.dataset.records();
        let duration: DurationRange = self.selection.duration();
        let stage1 = duration_tag_stage(records, &duration, self.selection.tags());

        let surviving = surviving_prefix(&stage1, self.selection.path());
        let truncated = surviving != *self.selection.path();
        if truncated {
            warn!(
                from = %self.selection.path(),
                to = %surviving,
                "occupation focus no longer present, truncating"
            );
            self.selection.set_path(surviving.clone());
            report.truncated_path = Some(surviving);
        }

        let chord_records = chord_view(records, &duration, self.selection.path());
        let recompute_matrix = plan.recompute_matrix || truncated;
        if recompute_matrix {
            self.matrix =
                CooccurrenceMatrix::from_records(chord_records.iter().copied(), &self.catalog);
            report.matrix_recomputes += 1;
        }

        let focused = occupation_stage(&stage1, self.selection.path());
        debug!(
            cause = ?plan.cause,
            stage1 = stage1.len(),
            focused = focused.len(),
            chord = chord_records.len(),
            path = %self.selection.path(),
            "recomputed filters"
        );

        for kind in ChartKind::DEPENDENCY_ORDER {
            let (subset, matrix) = match kind {
                ChartKind::CirclePack if !(plan.pack || truncated) => continue,
                ChartKind::CirclePack => (&stage1, None),
                ChartKind::Beeswarm | ChartKind::LineChart => (&focused, None),
                ChartKind::Chord => (&chord_records, recompute_matrix.then_some(&self.matrix)),
            };
            let Some(chart) = charts.iter_mut().find(|c| c.kind() == kind) else {
                continue;
            };
            let update = ChartUpdate {
                cause: plan.cause,
                records: subset,
                matrix,
                catalog: &self.catalog,
                selected_tags: self.selection.tags(),
                path: self.selection.path(),
            };
            chart.set_data(&update)?;
            report.redraws.push(kind);
        }
        Ok(())
    }
}
