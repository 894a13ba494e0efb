//! Common reconciler: the per-locale file of `common:` keys.

use super::document::TranslationDocument;
use super::inputs::{
    common_input_config,
    common_root_input,
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
use crate::paths::common_file_path;

/// Builds the reconciled common document. It carries no `urlTranslation`.
#[must_use]
pub fn reconcile_common(
    existing: &WorkingFile,
    ctx: &LocaleContext<'_>,
) -> (TranslationDocument, EntryTally) {
    let mut document = TranslationDocument::new(common_root_input(ctx.locale), None);

    let sources = MergeSources { existing, vendor: ctx.vendor, converter: ctx.converter };
    let mut tally = EntryTally::default();
    for (key, entry) in ctx.keys.common_keys() {
        tally.record(merge_entry(&mut document, key, common_input_config(key, entry), sources));
    }

    (document, tally)
}

/// Reconciles and overwrites the common file of the locale.
///
/// # Errors
/// Returns an error if the existing file cannot be read, parsed or rewritten.
pub async fn sync_common(ctx: &LocaleContext<'_>) -> Result<FileOutcome, SyncError> {
    let path = common_file_path(ctx.working_files_dir, ctx.locale);
    let existing = load_working_file(&path).await?;

    let (document, entries) = reconcile_common(&existing, ctx);
    write_document(&path, &document).await?;

    tracing::info!(
        locale = %ctx.locale,
        path = %path.display(),
        keys = entries.total(),
        "Common translation file updated"
    );
    Ok(FileOutcome { path, entries })
}
