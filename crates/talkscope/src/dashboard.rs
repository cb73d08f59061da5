use crate::{DashboardError, DashboardResult};
use serde::Serialize;
use std::path::Path;
use talkscope_core::{
    ChartAdapter, ChartKind, CooccurrenceMatrix, Coordinator, DashboardConfig, DashboardEvent,
    Dataset, DispatchReport, DurationRange, Gesture, GestureOutcome, OccupationPath,
    SelectionState, TagCatalog, TagRef, load_csv_path, load_csv_str,
};
use talkscope_render::model::{BeeswarmLayout, ChordLayout, CirclePackLayout, LineChartLayout};
use talkscope_render::{
    BeeswarmChart, BeeswarmConfig, ChordConfig, ChordDiagram, CirclePackChart, CirclePackConfig,
    LineChart, LineChartConfig,
};
use tracing::{debug, info};

/// Result of a routed gesture: what the chart answered and what the coordinator did about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub outcome: GestureOutcome,
    pub report: DispatchReport,
}

impl Interaction {
    fn ignored() -> Self {
        Self {
            outcome: GestureOutcome::Ignored,
            report: DispatchReport::default(),
        }
    }

    /// The URL to open, when the gesture activated a talk.
    pub fn url(&self) -> Option<&str> {
        match &self.outcome {
            GestureOutcome::OpenUrl(url) => Some(url),
            _ => None,
        }
    }
}

/// Snapshot of the four chart layouts plus the selection that produced them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayouts<'a> {
    pub selection: &'a SelectionState,
    pub circle_pack: Option<&'a CirclePackLayout>,
    pub beeswarm: Option<&'a BeeswarmLayout>,
    pub line_chart: Option<&'a LineChartLayout>,
    pub chord: Option<&'a ChordLayout>,
}

/// The coordinator wired to the four chart adapters.
///
/// Every mutating call publishes one event (directly or through a chart gesture) and drains the
/// bus before returning, so the charts are always consistent with [`Dashboard::selection`].
pub struct Dashboard {
    coordinator: Coordinator,
    circle_pack: CirclePackChart,
    beeswarm: BeeswarmChart,
    line_chart: LineChart,
    chord: ChordDiagram,
}

impl Dashboard {
    /// Builds the charts from `config` and pushes the initial view into each of them.
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> DashboardResult<Self> {
        let coordinator = Coordinator::new(dataset, config)?;
        let mut dashboard = Self {
            coordinator,
            circle_pack: CirclePackChart::new(CirclePackConfig::from_config(config)),
            beeswarm: BeeswarmChart::new(BeeswarmConfig::from_config(config)),
            line_chart: LineChart::new(LineChartConfig::from_config(config)),
            chord: ChordDiagram::new(ChordConfig::from_config(config)),
        };
        let report = dashboard.with_charts(|coordinator, charts| coordinator.initialize(charts))?;
        info!(
            charts = report.redraws.len(),
            tags = dashboard.selection().tags().len(),
            "dashboard initialized"
        );
        Ok(dashboard)
    }

    pub fn from_csv_path(
        path: impl AsRef<Path>,
        config: &DashboardConfig,
    ) -> DashboardResult<Self> {
        Self::new(load_csv_path(path)?, config)
    }

    pub fn from_csv_str(text: &str, config: &DashboardConfig) -> DashboardResult<Self> {
        Self::new(load_csv_str(text)?, config)
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn dataset(&self) -> &Dataset {
        self.coordinator.dataset()
    }

    pub fn catalog(&self) -> &TagCatalog {
        self.coordinator.catalog()
    }

    pub fn matrix(&self) -> &CooccurrenceMatrix {
        self.coordinator.matrix()
    }

    pub fn selection(&self) -> &SelectionState {
        self.coordinator.selection()
    }

    pub fn circle_pack(&self) -> &CirclePackChart {
        &self.circle_pack
    }

    pub fn beeswarm(&self) -> &BeeswarmChart {
        &self.beeswarm
    }

    pub fn line_chart(&self) -> &LineChart {
        &self.line_chart
    }

    pub fn chord(&self) -> &ChordDiagram {
        &self.chord
    }

    /// Publishes `event` and drains the bus.
    pub fn apply(&mut self, event: DashboardEvent) -> DashboardResult<DispatchReport> {
        self.coordinator.publish(event);
        self.dispatch()
    }

    pub fn dispatch(&mut self) -> DashboardResult<DispatchReport> {
        self.with_charts(|coordinator, charts| coordinator.dispatch(charts))
    }

    /// Moves the lower duration bound; a value above the upper bound is pulled down to it.
    pub fn set_duration_min(&mut self, min: u32) -> DashboardResult<DispatchReport> {
        self.coordinator.request_duration_min(min);
        self.dispatch()
    }

    /// Moves the upper duration bound; a value below the lower bound is pulled up to it.
    pub fn set_duration_max(&mut self, max: u32) -> DashboardResult<DispatchReport> {
        self.coordinator.request_duration_max(max);
        self.dispatch()
    }

    pub fn set_duration(&mut self, range: DurationRange) -> DashboardResult<DispatchReport> {
        self.apply(DashboardEvent::DurationChanged { range })
    }

    /// Toggles a tag by name, as a click on its chord arc would.
    pub fn toggle_tag(&mut self, tag: &str) -> DashboardResult<DispatchReport> {
        self.apply(DashboardEvent::TagClicked {
            tag: TagRef::Name(tag.to_string()),
        })
    }

    pub fn set_tags(&mut self, tags: &[String]) -> DashboardResult<DispatchReport> {
        self.apply(DashboardEvent::TagSelectionChanged {
            tags: tags.to_vec(),
        })
    }

    /// Clicks the chord arc of the tag ranked `index`.
    pub fn click_tag(&mut self, index: usize) -> DashboardResult<Interaction> {
        self.route(ChartKind::Chord, Gesture::Tag { index })
    }

    /// Clicks a circle-pack node by hierarchy id.
    pub fn click_node(&mut self, id: usize) -> DashboardResult<Interaction> {
        self.route(ChartKind::CirclePack, Gesture::Node { id })
    }

    /// Clicks the circle-pack background, zooming back out to the root.
    pub fn click_background(&mut self) -> DashboardResult<Interaction> {
        self.route(ChartKind::CirclePack, Gesture::Background)
    }

    /// Clicks the beeswarm mark at `index` of the current layout.
    pub fn click_mark(&mut self, index: usize) -> DashboardResult<Interaction> {
        self.route(ChartKind::Beeswarm, Gesture::Mark { index })
    }

    /// Zooms the circle pack to the group at `path` as if it had been clicked.
    pub fn focus(&mut self, path: &OccupationPath) -> DashboardResult<Interaction> {
        let Some(outcome) = self.circle_pack.focus_on(path) else {
            return Err(DashboardError::Core(talkscope_core::Error::UnknownOccupation {
                path: path.to_string(),
            }));
        };
        match outcome {
            GestureOutcome::Publish(event) => {
                let report = self.apply(event.clone())?;
                Ok(Interaction {
                    outcome: GestureOutcome::Publish(event),
                    report,
                })
            }
            outcome => Ok(Interaction {
                outcome,
                report: DispatchReport::default(),
            }),
        }
    }

    /// Advances the circle-pack zoom transition by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f64) {
        self.circle_pack.advance(dt_ms);
    }

    /// Jumps the circle-pack zoom transition to its end.
    pub fn finish(&mut self) {
        self.circle_pack.finish();
    }

    pub fn is_animating(&self) -> bool {
        self.circle_pack.is_animating()
    }

    pub fn layouts(&self) -> DashboardLayouts<'_> {
        DashboardLayouts {
            selection: self.selection(),
            circle_pack: self.circle_pack.layout(),
            beeswarm: self.beeswarm.layout(),
            line_chart: self.line_chart.layout(),
            chord: self.chord.layout(),
        }
    }

    pub fn layouts_json(&self, pretty: bool) -> DashboardResult<String> {
        let layouts = self.layouts();
        let json = if pretty {
            serde_json::to_string_pretty(&layouts)
        } else {
            serde_json::to_string(&layouts)
        };
        Ok(json.map_err(talkscope_render::Error::from)?)
    }

    /// The last SVG drawn by the chart of `kind`.
    pub fn svg(&self, kind: ChartKind) -> Option<&str> {
        match kind {
            ChartKind::CirclePack => self.circle_pack.surface().svg(),
            ChartKind::Beeswarm => self.beeswarm.surface().svg(),
            ChartKind::LineChart => self.line_chart.surface().svg(),
            ChartKind::Chord => self.chord.surface().svg(),
        }
    }

    fn route(&mut self, kind: ChartKind, gesture: Gesture) -> DashboardResult<Interaction> {
        let (outcome, report) = self.with_charts(|coordinator, charts| {
            coordinator.route_gesture(kind, &gesture, charts)
        })?;
        if outcome == GestureOutcome::Ignored {
            debug!(chart = kind.name(), ?gesture, "gesture ignored");
            return Ok(Interaction::ignored());
        }
        Ok(Interaction { outcome, report })
    }

    fn with_charts<T>(
        &mut self,
        f: impl FnOnce(&mut Coordinator, &mut [&mut dyn ChartAdapter]) -> talkscope_core::Result<T>,
    ) -> DashboardResult<T> {
        let Self {
            coordinator,
            circle_pack,
            beeswarm,
            line_chart,
            chord,
        } = self;
        let mut charts: [&mut dyn ChartAdapter; 4] = [circle_pack, beeswarm, line_chart, chord];
        Ok(f(coordinator, &mut charts)?)
    }
}
