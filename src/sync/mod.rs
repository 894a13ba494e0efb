//! Reconciliation of working files against the inventories.

pub mod common;
pub mod document;
pub mod inputs;
pub mod merge;
pub mod orchestrator;
pub mod page;
pub mod prune;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::{
    LocaleReport,
    LocaleSummary,
    SyncReport,
};
