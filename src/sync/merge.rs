//! The merge policy shared by the page and common reconcilers.
//!
//! A value is resolved from, in order: the existing non-empty translation, the
//! converted vendor snippet, and finally the empty string. An existing
//! non-empty value is never replaced.

use super::document::{
    Group,
    InputConfig,
    TranslationDocument,
};
use crate::input::vendor::VendorFeed;
use crate::input::working_file::WorkingFile;
use crate::markup::MarkupConverter;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Kept from the existing working file.
    Existing,
    /// Filled from the vendor feed.
    Vendor,
    /// Nothing available yet.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub source: ValueSource,
}

/// Per-source entry counts of a reconciled file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryTally {
    pub preserved: usize,
    pub from_vendor: usize,
    pub pending: usize,
}

impl EntryTally {
    pub const fn record(&mut self, source: ValueSource) {
        match source {
            ValueSource::Existing => self.preserved += 1,
            ValueSource::Vendor => self.from_vendor += 1,
            ValueSource::Empty => self.pending += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.preserved + self.from_vendor + self.pending
    }

    pub const fn absorb(&mut self, other: Self) {
        self.preserved += other.preserved;
        self.from_vendor += other.from_vendor;
        self.pending += other.pending;
    }
}

/// Read-only inputs of one merge.
#[derive(Clone, Copy)]
pub struct MergeSources<'a> {
    pub existing: &'a WorkingFile,
    pub vendor: &'a VendorFeed,
    pub converter: &'a dyn MarkupConverter,
}

impl std::fmt::Debug for MergeSources<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeSources")
            .field("existing", &self.existing)
            .field("vendor", &self.vendor)
            .field("converter", &"<dyn MarkupConverter>")
            .finish()
    }
}

/// Resolves the value of `key`.
///
/// A snippet that fails to convert, or converts to nothing, counts as no
/// vendor translation.
#[must_use]
pub fn resolve_value(
    key: &str,
    existing: Option<&str>,
    vendor: Option<&str>,
    converter: &dyn MarkupConverter,
) -> Resolution {
    if let Some(value) = existing.filter(|value| !value.is_empty()) {
        return Resolution { value: value.to_string(), source: ValueSource::Existing };
    }

    if let Some(snippet) = vendor {
        match converter.convert(snippet) {
            Ok(value) if !value.is_empty() => {
                return Resolution { value, source: ValueSource::Vendor };
            }
            Ok(_) => tracing::debug!(%key, "Vendor snippet converted to empty text"),
            Err(error) => {
                tracing::warn!(%key, %error, "Failed to convert vendor snippet, leaving it untranslated");
            }
        }
    }

    Resolution { value: String::new(), source: ValueSource::Empty }
}

/// Non-empty values are translated, empty ones still need translating.
#[must_use]
pub const fn classify(value: &str) -> Group {
    if value.is_empty() { Group::Pending } else { Group::Translated }
}

/// Merges one key into `document`: resolves its value, stores its input
/// configuration and files it under its group.
pub fn merge_entry(
    document: &mut TranslationDocument,
    key: &str,
    input: InputConfig,
    sources: MergeSources<'_>,
) -> ValueSource {
    let Resolution { value, source } = resolve_value(
        key,
        sources.existing.translation(key),
        sources.vendor.get(key),
        sources.converter,
    );

    let group = classify(&value);
    document.entries.insert(key.to_string(), value);
    document.inputs.keys.insert(key.to_string(), input);
    document.inputs.root.options.groups.get_mut(group).inputs.push(key.to_string());

    source
}
