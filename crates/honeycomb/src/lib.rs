#![forbid(unsafe_code)]

//! Headless circle layout algorithms.
//!
//! `honeycomb` is used by `talkscope-render` for the beeswarm and circle-pack charts:
//! - [`dodge`]: one-dimensional beeswarm packing (collision-free circles along a value axis)
//! - [`pack`]: enclosing-circle packing of a weighted [`Hierarchy`]
//! - [`zoom`]: smooth pan/zoom interpolation plus the focus/label state machine used for
//!   semantic zoom over a packed hierarchy
//!
//! All entry points are pure functions of their inputs; there is no hidden global state and no
//! source of nondeterminism (the enclosing-circle search uses a fixed-seed LCG).

pub mod dodge;
pub mod error;
pub mod hierarchy;
pub mod pack;
pub mod zoom;

pub use dodge::{DodgeOptions, DodgedCircle, dodge};
pub use error::{Error, Result};
pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use pack::{Circle, PackOptions, enclose, pack, pack_siblings};
pub use zoom::{ClickTarget, LabelState, View, ZoomInterpolator, ZoomOutcome, ZoomState};
