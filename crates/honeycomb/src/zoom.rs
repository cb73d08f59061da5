//! Semantic zoom over a packed hierarchy.
//!
//! A [`View`] is a window `(x, y, width)` centred on `(x, y)`. Moving between two views follows
//! the "smooth and efficient zooming and panning" path of van Wijk & Nuij, the same curve used by
//! browser charting toolkits, so that a zoom-out/pan/zoom-in reads as one continuous motion.
//!
//! [`ZoomState`] is the focus state machine: it owns the focused node, the current (possibly
//! mid-animation) view and the label visibility of every node.

use crate::hierarchy::{Hierarchy, NodeId};
use crate::pack::Circle;
use serde::{Deserialize, Serialize};

const RHO: f64 = std::f64::consts::SQRT_2;
const RHO2: f64 = 2.0;
const RHO4: f64 = 4.0;
const EPSILON2: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl View {
    pub fn new(x: f64, y: f64, width: f64) -> Self {
        Self { x, y, width }
    }

    /// The view that frames `circle` edge to edge.
    pub fn framing(circle: &Circle) -> Self {
        Self::new(circle.x, circle.y, circle.r * 2.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ZoomInterpolator {
    from: View,
    to: View,
    dx: f64,
    dy: f64,
    /// `None` when both views share a center (pure scale).
    path: Option<(f64, f64)>,
    s: f64,
}

impl ZoomInterpolator {
    pub fn new(from: View, to: View) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let d2 = dx * dx + dy * dy;
        let (w0, w1) = (from.width, to.width);

        if !(w0 > 0.0 && w1 > 0.0) {
            // Collapsed views (empty layouts) have no zoom curve; snap at the end.
            return Self {
                from,
                to,
                dx,
                dy,
                path: None,
                s: 0.0,
            };
        }

        if d2 < EPSILON2 {
            let s = (w1 / w0).ln() / RHO;
            return Self {
                from,
                to,
                dx,
                dy,
                path: None,
                s,
            };
        }

        let d1 = d2.sqrt();
        let b0 = (w1 * w1 - w0 * w0 + RHO4 * d2) / (2.0 * w0 * RHO2 * d1);
        let b1 = (w1 * w1 - w0 * w0 - RHO4 * d2) / (2.0 * w1 * RHO2 * d1);
        let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
        let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
        Self {
            from,
            to,
            dx,
            dy,
            path: Some((d1, r0)),
            s: (r1 - r0) / RHO,
        }
    }

    /// The view at parameter `t ∈ [0, 1]`. `t >= 1` yields the target exactly.
    pub fn at(&self, t: f64) -> View {
        if t >= 1.0 {
            return self.to;
        }
        let View { x: ux0, y: uy0, width: w0 } = self.from;
        match self.path {
            None => View::new(
                ux0 + t * self.dx,
                uy0 + t * self.dy,
                w0 * (RHO * t * self.s).exp(),
            ),
            Some((d1, r0)) => {
                let s = t * self.s;
                let cosh_r0 = r0.cosh();
                let u = w0 / (RHO2 * d1) * (cosh_r0 * (RHO * s + r0).tanh() - r0.sinh());
                View::new(
                    ux0 + u * self.dx,
                    uy0 + u * self.dy,
                    w0 * cosh_r0 / (RHO * s + r0).cosh(),
                )
            }
        }
    }

    /// Path-length-proportional duration suggested by the curve itself.
    pub fn natural_duration_ms(&self) -> f64 {
        (self.s * 1000.0 * RHO / std::f64::consts::SQRT_2).abs()
    }
}

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Node(NodeId),
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomOutcome {
    Ignored,
    /// A leaf directly under the focus was clicked.
    Activate(NodeId),
    /// The focus moved to this node and a transition started.
    FocusChanged(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelState {
    /// Attached to the scene and hit-testable.
    pub displayed: bool,
    pub opacity: f64,
    #[serde(skip)]
    fade: Option<(f64, f64)>,
}

impl LabelState {
    fn settled(visible: bool) -> Self {
        Self {
            displayed: visible,
            opacity: if visible { 1.0 } else { 0.0 },
            fade: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Transition {
    interpolator: ZoomInterpolator,
    duration_ms: f64,
    elapsed_ms: f64,
}

#[derive(Debug, Clone)]
pub struct ZoomState {
    parents: Vec<Option<NodeId>>,
    has_children: Vec<bool>,
    circles: Vec<Circle>,
    focus: NodeId,
    view: View,
    labels: Vec<LabelState>,
    transition: Option<Transition>,
    duration_ms: f64,
}

impl ZoomState {
    /// Starts focused on the root with root children labelled.
    pub fn new<T>(hierarchy: &Hierarchy<T>, circles: &[Circle], duration_ms: f64) -> Self {
        let parents = hierarchy.nodes().iter().map(|n| n.parent).collect::<Vec<_>>();
        let has_children = hierarchy
            .nodes()
            .iter()
            .map(|n| !n.children.is_empty())
            .collect::<Vec<_>>();
        let root = hierarchy.root();
        let labels = parents
            .iter()
            .map(|p| LabelState::settled(*p == Some(root)))
            .collect();
        Self {
            parents,
            has_children,
            circles: circles.to_vec(),
            focus: root,
            view: View::framing(&circles[root]),
            labels,
            transition: None,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn labels(&self) -> &[LabelState] {
        &self.labels
    }

    pub fn label(&self, id: NodeId) -> Option<&LabelState> {
        self.labels.get(id)
    }

    /// Applies a click and reports what the caller should do.
    pub fn click(&mut self, target: ClickTarget) -> ZoomOutcome {
        match target {
            ClickTarget::Background => {
                let root = Hierarchy::<()>::ROOT;
                if self.focus == root {
                    return ZoomOutcome::Ignored;
                }
                self.zoom_to(root);
                ZoomOutcome::FocusChanged(root)
            }
            ClickTarget::Node(id) if id >= self.parents.len() => ZoomOutcome::Ignored,
            ClickTarget::Node(id) => {
                if !self.has_children[id] {
                    if self.parents[id] == Some(self.focus) {
                        return ZoomOutcome::Activate(id);
                    }
                    return ZoomOutcome::Ignored;
                }
                if id == self.focus {
                    return ZoomOutcome::Ignored;
                }
                self.zoom_to(id);
                ZoomOutcome::FocusChanged(id)
            }
        }
    }

    /// Moves the focus to `id` with an animated transition starting at the current view.
    ///
    /// A running transition is superseded: the new one starts wherever the old one currently is.
    pub fn zoom_to(&mut self, id: NodeId) {
        self.focus = id;
        let target = View::framing(&self.circles[id]);
        self.transition = Some(Transition {
            interpolator: ZoomInterpolator::new(self.view, target),
            duration_ms: self.duration_ms,
            elapsed_ms: 0.0,
        });

        for (node, label) in self.labels.iter_mut().enumerate() {
            let child_of_focus = self.parents[node] == Some(id);
            if child_of_focus || label.displayed {
                label.fade = Some((label.opacity, if child_of_focus { 1.0 } else { 0.0 }));
                if child_of_focus {
                    label.displayed = true;
                }
            }
        }

        if self.duration_ms <= 0.0 {
            self.finish();
        }
    }

    /// Focuses `id` immediately, without animation.
    pub fn jump_to(&mut self, id: NodeId) {
        self.focus = id;
        self.transition = None;
        self.view = View::framing(&self.circles[id]);
        for (node, label) in self.labels.iter_mut().enumerate() {
            *label = LabelState::settled(self.parents[node] == Some(id));
        }
    }

    /// Advances the running transition by `dt_ms` and returns the resulting view.
    pub fn advance(&mut self, dt_ms: f64) -> View {
        let Some(transition) = self.transition.as_mut() else {
            return self.view;
        };
        transition.elapsed_ms += dt_ms.max(0.0);
        let t = if transition.duration_ms > 0.0 {
            (transition.elapsed_ms / transition.duration_ms).min(1.0)
        } else {
            1.0
        };
        let eased = ease_cubic_in_out(t);
        self.view = transition.interpolator.at(eased);
        for label in &mut self.labels {
            if let Some((from, to)) = label.fade {
                label.opacity = from + (to - from) * eased;
            }
        }
        if t >= 1.0 {
            self.finish();
        }
        self.view
    }

    /// Jumps to the end of the running transition, if any.
    pub fn finish(&mut self) {
        if let Some(transition) = self.transition.take() {
            self.view = transition.interpolator.at(1.0);
        }
        let focus = self.focus;
        for (node, label) in self.labels.iter_mut().enumerate() {
            if let Some((_, to)) = label.fade.take() {
                label.opacity = to;
                if self.parents[node] != Some(focus) {
                    label.displayed = false;
                }
            }
        }
    }

    /// Samples the remaining transition at a fixed frame interval, ending on the final view.
    pub fn frames(&mut self, frame_ms: f64) -> Vec<View> {
        let mut out = Vec::new();
        if frame_ms <= 0.0 {
            self.finish();
            out.push(self.view);
            return out;
        }
        while self.is_animating() {
            out.push(self.advance(frame_ms));
        }
        out
    }

    /// Screen-space circle for `id` under the current view, for a viewport `viewport_width` wide
    /// centred on the origin.
    pub fn project(&self, id: NodeId, viewport_width: f64) -> Circle {
        let c = &self.circles[id];
        let k = if self.view.width > 0.0 {
            viewport_width / self.view.width
        } else {
            0.0
        };
        Circle::new((c.x - self.view.x) * k, (c.y - self.view.y) * k, c.r * k)
    }
}
