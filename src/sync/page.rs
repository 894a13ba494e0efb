//! Page reconciler: one working file per page and locale.

use super::document::TranslationDocument;
use super::inputs::{
    page_input_config,
    page_root_input,
    url_translation_input,
};
use super::merge::{
    EntryTally,
    MergeSources,
    merge_entry,
};
use super::types::{
    FileOutcome,
    LocaleContext,
};
use crate::error::SyncError;
use crate::input::working_file::{
    WorkingFile,
    load_working_file,
    write_document,
};
use crate::paths::working_file_path;

/// Builds the reconciled document of `page` from its existing working file.
///
/// Only page-scoped keys that appear on `page` are written, so keys dropped
/// from the inventory (or moved to another page) disappear from the file.
#[must_use]
pub fn reconcile_page(
    page: &str,
    existing: &WorkingFile,
    ctx: &LocaleContext<'_>,
) -> (TranslationDocument, EntryTally) {
    let mut document = TranslationDocument::new(
        page_root_input(page, ctx.locale, ctx.base_url),
        Some(url_translation_input(ctx.locale)),
    );
    document.url_translation = Some(existing.url_translation().unwrap_or(page).to_string());

    let sources = MergeSources { existing, vendor: ctx.vendor, converter: ctx.converter };
    let mut tally = EntryTally::default();
    for (key, entry) in ctx.keys.page_keys(page) {
        let input = page_input_config(key, entry, page, ctx.base_url);
        tally.record(merge_entry(&mut document, key, input, sources));
    }

    (document, tally)
}

/// Reconciles `page` and overwrites its working file.
///
/// # Errors
/// Returns an error if the page path is unusable, or the existing file cannot
/// be read, parsed or rewritten.
pub async fn sync_page(page: &str, ctx: &LocaleContext<'_>) -> Result<FileOutcome, SyncError> {
    let path = working_file_path(ctx.working_files_dir, ctx.locale, page)?;
    let existing = load_working_file(&path).await?;

    let (document, entries) = reconcile_page(page, &existing, ctx);
    write_document(&path, &document).await?;

    tracing::info!(
        locale = %ctx.locale,
        path = %path.display(),
        preserved = entries.preserved,
        from_vendor = entries.from_vendor,
        pending = entries.pending,
        "Translation file updated"
    );
    Ok(FileOutcome { path, entries })
}
