//! Readers for the engine's on-disk inputs and the working file store.

pub mod inventory;
pub mod vendor;
pub mod working_file;

use std::path::Path;

use crate::error::SyncError;

/// Reads a file that is allowed to be absent.
///
/// Returns `Ok(None)` when the file does not exist or only holds whitespace,
/// so callers can fall back to their empty value.
pub(crate) async fn read_optional(path: &Path) -> Result<Option<String>, SyncError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SyncError::Read { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn read_optional_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_optional(&temp_dir.path().join("absent.json")).await;

        assert_that!(result, ok(none()));
    }

    #[tokio::test]
    async fn read_optional_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        std::fs::write(&path, " \n").unwrap();

        assert_that!(read_optional(&path).await, ok(none()));
    }

    #[tokio::test]
    async fn read_optional_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_optional(temp_dir.path()).await;

        assert_that!(result, err(displays_as(starts_with("Failed to read"))));
    }

    #[tokio::test]
    async fn read_optional_returns_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("feed.json");
        std::fs::write(&path, "{}").unwrap();

        assert_that!(read_optional(&path).await, ok(some(eq("{}"))));
    }
}
