//! Shared context and result types of a sync run.

use std::path::{
    Path,
    PathBuf,
};

use super::merge::EntryTally;
use crate::error::SyncError;
use crate::input::inventory::KeyInventory;
use crate::input::vendor::VendorFeed;
use crate::markup::MarkupConverter;

/// Read-only data shared by every reconciliation of one locale.
#[derive(Clone, Copy)]
pub struct LocaleContext<'a> {
    pub locale: &'a str,
    pub base_url: &'a str,
    /// Root of all working files (the parent of the locale directories).
    pub working_files_dir: &'a Path,
    pub keys: &'a KeyInventory,
    pub vendor: &'a VendorFeed,
    pub converter: &'a dyn MarkupConverter,
}

impl std::fmt::Debug for LocaleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleContext")
            .field("locale", &self.locale)
            .field("base_url", &self.base_url)
            .field("working_files_dir", &self.working_files_dir)
            .field("keys", &self.keys.keys.len())
            .field("vendor", &self.vendor.len())
            .field("converter", &"<dyn MarkupConverter>")
            .finish()
    }
}

/// Result of writing one working file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub entries: EntryTally,
}

/// What a successful locale sync did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSummary {
    pub pages_written: usize,
    /// Pages whose path cannot be mapped to a working file.
    pub pages_skipped: usize,
    pub files_pruned: Vec<PathBuf>,
    pub common_keys: usize,
    /// Entry counts over page and common files.
    pub entries: EntryTally,
}

#[derive(Debug)]
pub struct LocaleReport {
    pub locale: String,
    pub outcome: Result<LocaleSummary, SyncError>,
}

/// Per-locale outcomes of a run, in configured locale order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub locales: Vec<LocaleReport>,
}

impl SyncReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.locales.iter().all(|report| report.outcome.is_ok())
    }

    /// Locales that failed, with their cause.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &SyncError)> {
        self.locales
            .iter()
            .filter_map(|report| report.outcome.as_ref().err().map(|e| (report.locale.as_str(), e)))
    }

    /// Summary of `locale`, if it was processed successfully.
    #[must_use]
    pub fn summary(&self, locale: &str) -> Option<&LocaleSummary> {
        self.locales
            .iter()
            .find(|report| report.locale == locale)
            .and_then(|report| report.outcome.as_ref().ok())
    }
}
