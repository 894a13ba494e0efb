//! Machine-translation vendor feed: one `<locale>.json` per locale.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use super::read_optional;
use crate::error::SyncError;
use crate::paths::vendor_feed_path;

/// Key → translated markup snippet for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFeed {
    /// Key → snippet
    snippets: IndexMap<String, String>,
}

impl VendorFeed {
    /// Snippet for `key`, if the vendor has a non-empty one.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.snippets.get(key).map(String::as_str).filter(|snippet| !snippet.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VendorFeed {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { snippets: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Parses a vendor feed document. Non-string values are dropped.
fn parse_feed(content: &str, path: &Path) -> Result<VendorFeed, SyncError> {
    let raw: IndexMap<String, Value> = serde_json::from_str(content)
        .map_err(|source| SyncError::Json { path: path.to_path_buf(), source })?;

    let snippets = raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(snippet) => Some((key, snippet)),
            other => {
                tracing::debug!(%key, value = %other, "Ignoring non-string vendor snippet");
                None
            }
        })
        .collect();

    Ok(VendorFeed { snippets })
}

/// Loads the vendor feed of `locale` from `vendor_dir`.
///
/// A missing or blank feed file yields an empty feed.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON object.
pub async fn load_vendor_feed(vendor_dir: &Path, locale: &str) -> Result<VendorFeed, SyncError> {
    let path = vendor_feed_path(vendor_dir, locale);
    let Some(content) = read_optional(&path).await? else {
        tracing::debug!(%locale, path = %path.display(), "No vendor feed, using empty feed");
        return Ok(VendorFeed::default());
    };

    let feed = parse_feed(&content, &path)?;
    tracing::debug!(%locale, snippets = feed.len(), "Loaded vendor feed");
    Ok(feed)
}
