//! Working file store: per-locale YAML translation documents.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use super::read_optional;
use crate::error::SyncError;

/// Field holding the localized page path.
pub const URL_TRANSLATION_FIELD: &str = "urlTranslation";

/// User data of a previously written working file.
///
/// Metadata (`_inputs` and any other `_`-prefixed field) is dropped on load
/// because it is regenerated on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingFile {
    /// `urlTranslation` as stored
    url_translation: Option<String>,
    /// Translations in file order
    entries: IndexMap<String, String>,
}

impl WorkingFile {
    /// Parses and normalizes a working file document.
    ///
    /// # Errors
    /// Returns an error if the text is not YAML or its top level is not a mapping.
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, SyncError> {
        let document: Value = serde_yaml::from_str(content)
            .map_err(|source| SyncError::Yaml { path: path.to_path_buf(), source })?;

        let mapping = match document {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => return Err(SyncError::NotAMapping { path: path.to_path_buf() }),
        };

        let mut file = Self::default();
        for (key, value) in mapping {
            let Some(key) = scalar_to_string(&key) else {
                continue;
            };
            if key.starts_with('_') {
                continue;
            }
            let Some(value) = scalar_to_string(&value) else {
                tracing::debug!(path = %path.display(), %key, "Ignoring non-scalar entry");
                continue;
            };
            if key == URL_TRANSLATION_FIELD {
                file.url_translation = Some(value);
            } else {
                file.entries.insert(key, value);
            }
        }

        Ok(file)
    }

    /// Existing translation for `key`, if non-empty.
    #[must_use]
    pub fn translation(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Existing URL translation, if non-empty.
    #[must_use]
    pub fn url_translation(&self) -> Option<&str> {
        self.url_translation.as_deref().filter(|url| !url.is_empty())
    }

    /// Builder used by tests and callers assembling files in memory.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_url_translation(mut self, url: impl Into<String>) -> Self {
        self.url_translation = Some(url.into());
        self
    }

    /// Keys present in the file, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Normalizes a YAML scalar to its string form. `null` becomes empty.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Loads a working file; a missing or blank file yields an empty skeleton.
///
/// # Errors
/// Returns an error if the file cannot be read or is malformed.
pub async fn load_working_file(path: &Path) -> Result<WorkingFile, SyncError> {
    match read_optional(path).await? {
        Some(content) => WorkingFile::from_yaml_str(&content, path),
        None => Ok(WorkingFile::default()),
    }
}

/// Serializes `document` and writes it in one go, creating parent directories.
///
/// # Errors
/// Returns an error if serialization, directory creation or the write fails.
pub async fn write_document<T: Serialize + Sync>(path: &Path, document: &T) -> Result<(), SyncError> {
    let yaml = serde_yaml::to_string(document)
        .map_err(|source| SyncError::Serialize { path: path.to_path_buf(), source })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SyncError::CreateDir { path: parent.to_path_buf(), source })?;
    }

    tokio::fs::write(path, yaml)
        .await
        .map_err(|source| SyncError::Write { path: path.to_path_buf(), source })
}
