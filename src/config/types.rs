use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// Path to the field (e.g., "locales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Locale codes to generate working files for. Each one becomes a
    /// directory under `paths.workingFilesDir`.
    pub locales: Vec<String>,

    /// Public URL of the built site, used for "see on page" links.
    pub base_url: String,

    pub paths: PathsConfig,

    /// Glob patterns (relative to a locale directory) for working files the
    /// pruner must never delete.
    pub protected_files: Vec<String>,

    pub tuning: TuningConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PathsConfig {
    /// Key inventory (`base.json`) produced by the site scan.
    pub key_inventory_file: PathBuf,
    /// Page inventory (`base.urls.json`) produced by the site scan.
    pub page_inventory_file: PathBuf,
    /// Root directory of the per-locale working files.
    pub working_files_dir: PathBuf,
    /// Directory holding one `<locale>.json` vendor feed per locale.
    pub vendor_feed_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TuningConfig {
    /// Upper bound on pages reconciled at once within a locale.
    /// Default: 4 × CPU cores (minimum 1).
    pub max_concurrent_pages: Option<usize>,
}

impl TuningConfig {
    #[must_use]
    pub fn page_concurrency(&self) -> usize {
        self.max_concurrent_pages.unwrap_or_else(|| num_cpus::get().saturating_mul(4)).max(1)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            key_inventory_file: PathBuf::from("base.json"),
            page_inventory_file: PathBuf::from("base.urls.json"),
            working_files_dir: PathBuf::from("translations"),
            vendor_feed_dir: PathBuf::from("incoming"),
        }
    }
}

impl PathsConfig {
    /// Resolves relative paths against `base_dir` (the config file's directory).
    #[must_use]
    pub fn resolved_against(&self, base_dir: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
        };
        Self {
            key_inventory_file: resolve(&self.key_inventory_file),
            page_inventory_file: resolve(&self.page_inventory_file),
            working_files_dir: resolve(&self.working_files_dir),
            vendor_feed_dir: resolve(&self.vendor_feed_dir),
        }
    }
}

impl SyncSettings {
    /// # Errors
    /// - No locales, or an empty / duplicated / path-like locale code
    /// - Empty path
    /// - Invalid glob pattern
    /// - Zero page concurrency
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [\"es\", \"fr\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.locales.iter().enumerate() {
            if locale.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    "The locale cannot be empty",
                ));
            } else if locale.contains(['/', '\\']) || locale == "." || locale == ".." {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Invalid locale '{locale}': it is used as a directory name"),
                ));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        let paths = [
            ("paths.keyInventoryFile", &self.paths.key_inventory_file),
            ("paths.pageInventoryFile", &self.paths.page_inventory_file),
            ("paths.workingFilesDir", &self.paths.working_files_dir),
            ("paths.vendorFeedDir", &self.paths.vendor_feed_dir),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(field, "The path cannot be empty"));
            }
        }

        for (index, pattern) in self.protected_files.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("protectedFiles[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.tuning.max_concurrent_pages == Some(0) {
            errors.push(ValidationError::new(
                "tuning.maxConcurrentPages",
                "Must be at least 1, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
