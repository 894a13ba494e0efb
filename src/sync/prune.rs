//! Removal of working files whose page left the site.

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::ProtectedFiles;
use crate::error::SyncError;
use crate::input::inventory::PageInventory;
use crate::paths::{
    COMMON_FILE_NAME,
    WORKING_FILE_EXTENSION,
    file_owners,
};

/// Locale-relative file names (`blog/post.yaml`) owned by the current pages.
#[must_use]
pub fn expected_file_names(pages: &PageInventory) -> HashSet<String> {
    file_owners(pages.pages())
        .into_keys()
        .map(|name| format!("{name}.{WORKING_FILE_EXTENSION}"))
        .collect()
}

/// Lists every working file below `locale_dir`, in walk order.
///
/// Hidden files are included; ignore files are not consulted so that the
/// listing depends on the directory contents only.
///
/// # Errors
/// Returns an error if a directory entry cannot be read.
pub fn list_working_files(locale_dir: &Path) -> Result<Vec<PathBuf>, SyncError> {
    if !locale_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for result in WalkBuilder::new(locale_dir).standard_filters(false).follow_links(false).build() {
        let entry =
            result.map_err(|source| SyncError::Walk { path: locale_dir.to_path_buf(), source })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == WORKING_FILE_EXTENSION) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// `/`-joined path of `path` relative to `locale_dir`.
fn relative_name(path: &Path, locale_dir: &Path) -> Option<String> {
    let relative = path.strip_prefix(locale_dir).ok()?;
    let parts: Option<Vec<&str>> =
        relative.components().map(|component| component.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

/// Picks the files of `existing` that no current page maps to.
///
/// The top-level common file and files matched by `protected` are kept.
#[must_use]
pub fn stale_files(
    existing: &[PathBuf],
    locale_dir: &Path,
    pages: &PageInventory,
    protected: &ProtectedFiles,
) -> Vec<PathBuf> {
    let expected = expected_file_names(pages);
    let common = format!("{COMMON_FILE_NAME}.{WORKING_FILE_EXTENSION}");

    existing
        .iter()
        .filter(|path| {
            let Some(name) = relative_name(path, locale_dir) else {
                return false;
            };
            name != common && !expected.contains(&name) && !protected.is_protected(Path::new(&name))
        })
        .cloned()
        .collect()
}

/// Deletes stale working files of one locale and returns what was removed.
///
/// # Errors
/// Returns an error if the directory cannot be listed or a file cannot be
/// removed. A file that vanished in the meantime is not an error.
pub async fn prune_stale_files(
    locale: &str,
    locale_dir: &Path,
    pages: &PageInventory,
    protected: &ProtectedFiles,
) -> Result<Vec<PathBuf>, SyncError> {
    let existing = list_working_files(locale_dir)?;
    let stale = stale_files(&existing, locale_dir, pages, protected);

    let mut removed = Vec::with_capacity(stale.len());
    for path in stale {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(%locale, path = %path.display(), "Removed translation file for deleted page");
                removed.push(path);
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Stale file already gone");
            }
            Err(source) => return Err(SyncError::Remove { path, source }),
        }
    }
    Ok(removed)
}
