//! Mapping from site page paths to working file locations.
//!
//! A page's working file lives at `<root>/<locale>/<name>.yaml`, where `<name>`
//! mirrors the page path with the `.html` / `/index.html` suffix removed and
//! the site index renamed to `home`.

use std::path::{
    Component,
    Path,
    PathBuf,
};

use indexmap::IndexMap;

use crate::error::SyncError;

/// Extension of every working file.
pub const WORKING_FILE_EXTENSION: &str = "yaml";

/// Name of the per-locale shared file.
pub const COMMON_FILE_NAME: &str = "common";

/// Working file name (without extension) for a page path.
///
/// ```
/// use rosey_sync::paths::working_file_name;
///
/// assert_eq!(working_file_name("index.html"), "home");
/// assert_eq!(working_file_name("about.html"), "about");
/// assert_eq!(working_file_name("blog/index.html"), "blog");
/// assert_eq!(working_file_name("blog/first-post.html"), "blog/first-post");
/// ```
#[must_use]
pub fn working_file_name(page: &str) -> String {
    let page = page.trim_start_matches('/');
    let stem = if page == "index.html" || page.is_empty() {
        "index"
    } else if let Some(dir) = page.strip_suffix("/index.html") {
        dir
    } else if let Some(dir) = page.strip_suffix('/') {
        dir
    } else {
        page.strip_suffix(".html").unwrap_or(page)
    };

    if stem == "index" { "home".to_string() } else { stem.to_string() }
}

/// Directory holding every working file of a locale.
#[must_use]
pub fn locale_dir(root: &Path, locale: &str) -> PathBuf {
    root.join(locale)
}

/// Path of the shared `common` working file of a locale.
#[must_use]
pub fn common_file_path(root: &Path, locale: &str) -> PathBuf {
    locale_dir(root, locale).join(format!("{COMMON_FILE_NAME}.{WORKING_FILE_EXTENSION}"))
}

/// Path of a locale's vendor feed.
#[must_use]
pub fn vendor_feed_path(vendor_dir: &Path, locale: &str) -> PathBuf {
    vendor_dir.join(format!("{locale}.json"))
}

/// Path of a page's working file.
///
/// # Errors
/// Returns [`SyncError::InvalidPagePath`] when the page would escape the locale
/// directory or collide with the common file.
pub fn working_file_path(root: &Path, locale: &str, page: &str) -> Result<PathBuf, SyncError> {
    let name = working_file_name(page);
    let invalid =
        |reason: &str| SyncError::InvalidPagePath { page: page.to_string(), reason: reason.to_string() };

    if name == COMMON_FILE_NAME {
        return Err(invalid("maps onto the reserved common file"));
    }
    let relative = Path::new(&name);
    if !relative.components().all(|component| matches!(component, Component::Normal(_))) {
        return Err(invalid("must stay inside the locale directory"));
    }

    Ok(locale_dir(root, locale).join(format!("{name}.{WORKING_FILE_EXTENSION}")))
}

/// Working file name → the first page that maps to it, in page order.
///
/// Distinct pages can share a name (`about.html` and `about/index.html`); only
/// the first one owns the file.
#[must_use]
pub fn file_owners<'a>(pages: impl IntoIterator<Item = &'a str>) -> IndexMap<String, &'a str> {
    let mut owners = IndexMap::new();
    for page in pages {
        owners.entry(working_file_name(page)).or_insert(page);
    }
    owners
}

/// Checks that `page` owns its working file.
///
/// # Errors
/// Returns [`SyncError::InvalidPagePath`] when an earlier page maps to the same
/// working file.
pub fn check_file_owner(page: &str, owners: &IndexMap<String, &str>) -> Result<(), SyncError> {
    match owners.get(working_file_name(page).as_str()) {
        Some(owner) if *owner != page => Err(SyncError::InvalidPagePath {
            page: page.to_string(),
            reason: format!("maps to the same working file as '{owner}'"),
        }),
        _ => Ok(()),
    }
}
