//! Key and page inventories produced by scanning the built site.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncError;

/// Namespace prefix of keys shared by every page.
pub const COMMON_NAMESPACE: &str = "common:";

/// Returns true if the key belongs to the shared common file.
#[must_use]
pub fn is_common_key(key: &str) -> bool {
    key.starts_with(COMMON_NAMESPACE)
}

/// Keys that would collide with working file metadata.
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with('_') || key == "urlTranslation" || key == "$"
}

/// Canonical key inventory (`base.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyInventory {
    /// Key → entry, in file order.
    #[serde(default)]
    pub keys: IndexMap<String, KeyEntry>,
}

/// One translatable key as extracted from the site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyEntry {
    /// Canonical source text.
    #[serde(default)]
    pub original: String,

    /// Page path → presence flag or per-page metadata.
    #[serde(default)]
    pub pages: IndexMap<String, Value>,

    /// Remaining source fields, kept as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Page inventory (`base.urls.json`); its key set is the set of live pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInventory {
    /// Page path → metadata
    #[serde(default)]
    keys: IndexMap<String, Value>,
}

/// Truthiness of a page flag: `false`, `null`, `0` and `""` mean absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > f64::EPSILON),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl KeyEntry {
    /// Creates an entry appearing on the given pages.
    #[must_use]
    pub fn new<'a>(original: impl Into<String>, pages: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            original: original.into(),
            pages: pages.into_iter().map(|page| (page.to_string(), Value::Bool(true))).collect(),
            extra: serde_json::Map::new(),
        }
    }

    /// Returns true if the key appears on `page`.
    #[must_use]
    pub fn appears_on(&self, page: &str) -> bool {
        self.pages.get(page).is_some_and(is_truthy)
    }

    /// Pages the key appears on, in inventory order.
    pub fn live_pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().filter(|(_, flag)| is_truthy(flag)).map(|(page, _)| page.as_str())
    }
}

impl KeyInventory {
    /// Page-scoped keys appearing on `page`, excluding common and reserved keys.
    pub fn page_keys<'a>(&'a self, page: &'a str) -> impl Iterator<Item = (&'a str, &'a KeyEntry)> {
        self.keys
            .iter()
            .filter(move |(key, entry)| {
                !is_common_key(key) && !is_reserved_key(key) && entry.appears_on(page)
            })
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Every `common:` key, regardless of the pages it appears on.
    pub fn common_keys(&self) -> impl Iterator<Item = (&str, &KeyEntry)> {
        self.keys
            .iter()
            .filter(|(key, _)| is_common_key(key))
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Keys the engine will never write because they clash with metadata.
    pub fn reserved_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str).filter(|key| is_reserved_key(key))
    }
}

impl FromIterator<(String, KeyEntry)> for KeyInventory {
    fn from_iter<T: IntoIterator<Item = (String, KeyEntry)>>(iter: T) -> Self {
        Self { keys: iter.into_iter().collect() }
    }
}

impl PageInventory {
    /// Live page paths, in inventory order.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PageInventory {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self { keys: iter.into_iter().map(|page| (page.to_string(), Value::Bool(true))).collect() }
    }
}

/// Reads a required inventory file.
async fn read_inventory(path: &Path) -> Result<String, SyncError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(SyncError::MissingInventory(path.to_path_buf()))
        }
        Err(source) => Err(SyncError::Read { path: path.to_path_buf(), source }),
    }
}

/// Loads the key inventory.
///
/// # Errors
/// Returns an error if the file is missing, unreadable or not valid JSON.
pub async fn load_key_inventory(path: &Path) -> Result<KeyInventory, SyncError> {
    let content = read_inventory(path).await?;
    let inventory: KeyInventory = serde_json::from_str(&content)
        .map_err(|source| SyncError::Json { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), keys = inventory.keys.len(), "Loaded key inventory");
    Ok(inventory)
}

/// Loads the page inventory.
///
/// # Errors
/// Returns an error if the file is missing, unreadable or not valid JSON.
pub async fn load_page_inventory(path: &Path) -> Result<PageInventory, SyncError> {
    let content = read_inventory(path).await?;
    let inventory: PageInventory = serde_json::from_str(&content)
        .map_err(|source| SyncError::Json { path: path.to_path_buf(), source })?;

    tracing::debug!(path = %path.display(), pages = inventory.len(), "Loaded page inventory");
    Ok(inventory)
}
