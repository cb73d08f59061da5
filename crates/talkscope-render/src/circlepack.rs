//! Zoomable occupation circle pack.
//!
//! Talks are grouped broader → categorized → speaker occupation under a single root. An
//! occupation with one talk is itself the talk's leaf; an occupation with several talks gets one
//! leaf per talk, named after the speaker. Every talk weighs 1.

use crate::model::{CirclePackLayout, Frame, PackNodeKind, PackNodeLayout};
use crate::surface::SvgSurface;
use crate::{Result, chart_error, svg};
use honeycomb::{
    Circle, ClickTarget, Hierarchy, NodeId, PackOptions, ZoomOutcome, ZoomState, pack,
};
use indexmap::IndexMap;
use serde::Serialize;
use talkscope_core::{
    ChartAdapter, ChartKind, ChartUpdate, DashboardConfig, DashboardEvent, Gesture,
    GestureOutcome, Margin, OccupationPath, TalkRecord,
};
use tracing::debug;

pub const ROOT_NAME: &str = "all categories";

/// Depth colors run from white at the root to purple at depth 4.
const DEPTH_COLOR_FROM: (u8, u8, u8) = (0xff, 0xff, 0xff);
const DEPTH_COLOR_TO: (u8, u8, u8) = (0x80, 0x00, 0x80);
const DEPTH_COLOR_DOMAIN: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TalkSummary {
    pub id: u64,
    pub headline: String,
    pub speaker: String,
    pub occupation: String,
    pub duration: u32,
    pub views: u64,
    pub url: String,
}

impl TalkSummary {
    fn from_record(record: &TalkRecord) -> Self {
        Self {
            id: record.id,
            headline: record.headline.clone(),
            speaker: record.speaker_1.clone(),
            occupation: record.speaker1_occupation.clone(),
            duration: record.duration,
            views: record.views,
            url: record.public_url.clone(),
        }
    }
}

pub type OccupationNodeKind = PackNodeKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationNode {
    pub name: String,
    pub kind: OccupationNodeKind,
    /// The talk a leaf stands for.
    pub talk: Option<TalkSummary>,
}

impl OccupationNode {
    fn group(name: &str, kind: OccupationNodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            talk: None,
        }
    }
}

type Grouped<'a> = IndexMap<&'a str, IndexMap<&'a str, IndexMap<&'a str, Vec<&'a TalkRecord>>>>;

/// Builds the occupation tree with summed, descending-sorted weights.
pub fn build_occupation_hierarchy(records: &[&TalkRecord]) -> Hierarchy<OccupationNode> {
    let mut grouped: Grouped<'_> = IndexMap::new();
    for &record in records {
        grouped
            .entry(record.occupation_broader.as_str())
            .or_default()
            .entry(record.occupation_categorized.as_str())
            .or_default()
            .entry(record.speaker1_occupation.as_str())
            .or_default()
            .push(record);
    }

    let mut tree = Hierarchy::new(OccupationNode::group(ROOT_NAME, PackNodeKind::Root));
    let root = tree.root();
    for (broader, categories) in &grouped {
        let b = tree.push_child(root, OccupationNode::group(broader, PackNodeKind::Broader));
        for (categorized, occupations) in categories {
            let c = tree.push_child(
                b,
                OccupationNode::group(categorized, PackNodeKind::Categorized),
            );
            for (occupation, talks) in occupations {
                if let [only] = talks.as_slice() {
                    tree.push_child(
                        c,
                        OccupationNode {
                            name: occupation.to_string(),
                            kind: PackNodeKind::Occupation,
                            talk: Some(TalkSummary::from_record(only)),
                        },
                    );
                    continue;
                }
                let o = tree.push_child(
                    c,
                    OccupationNode::group(occupation, PackNodeKind::Occupation),
                );
                for talk in talks {
                    tree.push_child(
                        o,
                        OccupationNode {
                            name: talk.speaker_1.clone(),
                            kind: PackNodeKind::Talk,
                            talk: Some(TalkSummary::from_record(talk)),
                        },
                    );
                }
            }
        }
    }

    tree.sum(|node| if node.talk.is_some() { 1.0 } else { 0.0 });
    tree.sort_by_value_desc();
    tree
}

#[derive(Debug, Clone)]
pub struct PackedOccupations {
    pub hierarchy: Hierarchy<OccupationNode>,
    /// Indexed by node id.
    pub circles: Vec<Circle>,
}

impl PackedOccupations {
    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_leaf(self.hierarchy.root())
    }

    /// The group node at `path`, walking names level by level.
    pub fn node_for_path(&self, path: &OccupationPath) -> Option<NodeId> {
        let mut cur = self.hierarchy.root();
        for segment in path.segments() {
            cur = self
                .hierarchy
                .find_child(cur, |n| n.kind != PackNodeKind::Talk && n.name == *segment)?;
        }
        Some(cur)
    }

    /// The node the view focuses for `path`: the group at `path`, or its parent when filtering
    /// has collapsed that group into a single-talk leaf. Unknown paths focus the root.
    pub fn focus_node(&self, path: &OccupationPath) -> NodeId {
        let root = self.hierarchy.root();
        let Some(id) = self.node_for_path(path) else {
            return root;
        };
        if self.hierarchy.is_leaf(id) {
            self.hierarchy.node(id).parent.unwrap_or(root)
        } else {
            id
        }
    }

    /// The occupation path of `id`; talk leaves resolve to their occupation.
    pub fn path_of(&self, id: NodeId) -> OccupationPath {
        let names = self
            .hierarchy
            .path_from_root(id)
            .into_iter()
            .map(|n| self.hierarchy.node(n))
            .filter(|n| n.data.kind != PackNodeKind::Talk)
            .map(|n| n.data.name.clone())
            .collect::<Vec<_>>();
        OccupationPath::new(names).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CirclePackConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub padding: f64,
    pub transition_ms: f64,
}

impl Default for CirclePackConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            margin: Margin {
                top: 25.0,
                right: 30.0,
                bottom: 25.0,
                left: 30.0,
            },
            padding: 3.0,
            transition_ms: 250.0,
        }
    }
}

impl CirclePackConfig {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let d = Self::default();
        let f = |key: &str, fallback: f64| {
            config
                .get_f64(&format!("circlePack.{key}"))
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(fallback)
        };
        Self {
            width: f("width", d.width),
            height: f("height", d.height),
            margin: Margin::read(config, "circlePack", d.margin),
            padding: f("padding", d.padding),
            transition_ms: f("transitionMs", d.transition_ms),
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            origin_x: self.margin.left / 2.0,
            origin_y: self.margin.top / 2.0,
            inner_width: (self.width - self.margin.left - self.margin.right).max(0.0),
            inner_height: (self.height - self.margin.top - self.margin.bottom).max(0.0),
        }
    }
}

pub fn pack_occupations(
    records: &[&TalkRecord],
    config: &CirclePackConfig,
) -> Result<PackedOccupations> {
    let hierarchy = build_occupation_hierarchy(records);
    let frame = config.frame();
    let circles = pack(
        &hierarchy,
        &PackOptions {
            width: frame.inner_width,
            height: frame.inner_height,
            padding: config.padding,
        },
    )?;
    Ok(PackedOccupations { hierarchy, circles })
}

pub fn depth_color(depth: usize) -> String {
    let t = (depth as f64 / DEPTH_COLOR_DOMAIN).clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(DEPTH_COLOR_FROM.0, DEPTH_COLOR_TO.0),
        mix(DEPTH_COLOR_FROM.1, DEPTH_COLOR_TO.1),
        mix(DEPTH_COLOR_FROM.2, DEPTH_COLOR_TO.2)
    )
}

/// Snapshot of `packed` under the current zoom view.
pub fn compute_circle_pack_layout(
    packed: &PackedOccupations,
    zoom: &ZoomState,
    config: &CirclePackConfig,
) -> CirclePackLayout {
    let frame = config.frame();
    let h = &packed.hierarchy;
    let nodes = h
        .each_before()
        .into_iter()
        .map(|id| {
            let node = h.node(id);
            let projected = zoom.project(id, frame.inner_width);
            let label = zoom.label(id).copied();
            PackNodeLayout {
                id,
                parent: node.parent,
                name: node.data.name.clone(),
                kind: node.data.kind,
                depth: node.depth,
                talks: node.value,
                x: projected.x,
                y: projected.y,
                r: projected.r,
                fill: depth_color(node.depth),
                label_displayed: label.is_some_and(|l| l.displayed),
                label_opacity: label.map(|l| l.opacity).unwrap_or(0.0),
                url: node
                    .children
                    .is_empty()
                    .then(|| node.data.talk.as_ref().map(|t| t.url.clone()))
                    .flatten(),
            }
        })
        .collect();
    let view = zoom.view();
    CirclePackLayout {
        frame,
        view_box: [
            -config.height / 2.0,
            -config.height / 2.0,
            config.width,
            config.height,
        ],
        focus: zoom.focus(),
        focus_path: packed.path_of(zoom.focus()).segments().to_vec(),
        view: [view.x, view.y, view.width],
        animating: zoom.is_animating(),
        nodes,
        empty: packed.is_empty(),
    }
}

#[derive(Debug, Clone)]
struct PackState {
    packed: PackedOccupations,
    zoom: ZoomState,
}

#[derive(Debug, Clone)]
pub struct CirclePackChart {
    config: CirclePackConfig,
    state: Option<PackState>,
    layout: Option<CirclePackLayout>,
    surface: SvgSurface,
}

impl CirclePackChart {
    pub fn new(config: CirclePackConfig) -> Self {
        Self {
            config,
            state: None,
            layout: None,
            surface: SvgSurface::new(),
        }
    }

    pub fn config(&self) -> &CirclePackConfig {
        &self.config
    }

    pub fn packed(&self) -> Option<&PackedOccupations> {
        self.state.as_ref().map(|s| &s.packed)
    }

    pub fn zoom(&self) -> Option<&ZoomState> {
        self.state.as_ref().map(|s| &s.zoom)
    }

    pub fn layout(&self) -> Option<&CirclePackLayout> {
        self.layout.as_ref()
    }

    pub fn surface(&self) -> &SvgSurface {
        &self.surface
    }

    pub fn focus_path(&self) -> OccupationPath {
        self.state
            .as_ref()
            .map(|s| s.packed.path_of(s.zoom.focus()))
            .unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.zoom.is_animating())
    }

    /// Steps the running zoom transition and redraws.
    pub fn advance(&mut self, dt_ms: f64) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.zoom.is_animating() {
            return;
        }
        state.zoom.advance(dt_ms);
        self.redraw();
    }

    /// Completes the running zoom transition and redraws.
    pub fn finish(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if !state.zoom.is_animating() {
            return;
        }
        state.zoom.finish();
        self.redraw();
    }

    /// Zooms to the group node at `path` exactly as a click on it would.
    ///
    /// Returns `None` when `path` names no group node of the current hierarchy.
    pub fn focus_on(&mut self, path: &OccupationPath) -> Option<GestureOutcome> {
        let state = self.state.as_ref()?;
        let id = state.packed.node_for_path(path)?;
        if state.packed.hierarchy.is_leaf(id) {
            return None;
        }
        Some(self.click(ClickTarget::Node(id)))
    }

    fn redraw(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let layout = compute_circle_pack_layout(&state.packed, &state.zoom, &self.config);
        self.surface.draw(svg::render_circle_pack_svg(&layout));
        self.layout = Some(layout);
    }

    fn click(&mut self, target: ClickTarget) -> GestureOutcome {
        let Some(state) = self.state.as_mut() else {
            return GestureOutcome::Ignored;
        };
        match state.zoom.click(target) {
            ZoomOutcome::Ignored => GestureOutcome::Ignored,
            ZoomOutcome::Activate(id) => state
                .packed
                .hierarchy
                .node(id)
                .data
                .talk
                .as_ref()
                .map(|t| GestureOutcome::OpenUrl(t.url.clone()))
                .unwrap_or(GestureOutcome::Ignored),
            ZoomOutcome::FocusChanged(id) => {
                let path = state.packed.path_of(id);
                debug!(node = id, %path, "circle pack focus changed");
                self.redraw();
                GestureOutcome::Publish(DashboardEvent::OccupationFocusChanged { path })
            }
        }
    }
}

impl ChartAdapter for CirclePackChart {
    fn kind(&self) -> ChartKind {
        ChartKind::CirclePack
    }

    fn set_data(&mut self, update: &ChartUpdate<'_>) -> talkscope_core::Result<()> {
        let packed = pack_occupations(update.records, &self.config)
            .map_err(|e| chart_error(ChartKind::CirclePack, e))?;
        let mut zoom =
            ZoomState::new(&packed.hierarchy, &packed.circles, self.config.transition_ms);
        zoom.jump_to(packed.focus_node(update.path));
        debug!(
            talks = update.records.len(),
            nodes = packed.hierarchy.len(),
            focus = %update.path,
            "circle pack layout"
        );
        self.state = Some(PackState { packed, zoom });
        self.redraw();
        Ok(())
    }

    fn gesture(&mut self, gesture: &Gesture) -> GestureOutcome {
        match gesture {
            Gesture::Node { id } => self.click(ClickTarget::Node(*id)),
            Gesture::Background => self.click(ClickTarget::Background),
            _ => GestureOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_colors_span_white_to_purple() {
        assert_eq!(depth_color(0), "#ffffff");
        assert_eq!(depth_color(4), "#800080");
        assert_eq!(depth_color(9), "#800080");
        assert_eq!(depth_color(2), "#c080c0");
    }
}
