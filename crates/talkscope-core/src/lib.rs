#![forbid(unsafe_code)]

//! Headless core of the talkscope dashboard.
//!
//! This crate owns everything that is not drawing: loading the talk data set, ranking the tag
//! catalog, counting tag co-occurrences, composing the duration/tag/occupation filters and
//! coordinating selection changes across the four charts.
//!
//! Charts plug in through the [`ChartAdapter`] trait; `talkscope-render` provides the concrete
//! adapters and `talkscope` wires them together.

pub mod catalog;
pub mod config;
pub mod cooccurrence;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod filter;
pub mod load;
pub mod record;
pub mod selection;

pub use catalog::{CatalogTag, PALETTE, TagCatalog};
pub use config::{DashboardConfig, Margin, TagsConfig};
pub use cooccurrence::CooccurrenceMatrix;
pub use coordinator::{
    ChartAdapter, ChartKind, ChartUpdate, Coordinator, DispatchReport, Gesture, GestureOutcome,
    UpdateCause,
};
pub use error::{Error, Result};
pub use event::{DashboardEvent, EventBus, TagRef};
pub use filter::{DurationRange, OccupationPath};
pub use load::{Dataset, load_csv_path, load_csv_reader, load_csv_str};
pub use record::{OccupationLevel, TalkRecord};
pub use selection::{SelectionState, TagToggle};

#[cfg(test)]
mod tests;
