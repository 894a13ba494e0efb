//! Glob matcher for working files the pruner must keep.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid protected file pattern '{pattern}': {source}")]
    InvalidProtectedPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches locale-relative working file paths against `protectedFiles`.
#[derive(Debug, Clone)]
pub struct ProtectedFiles {
    /// Compiled patterns
    set: GlobSet,
}

impl ProtectedFiles {
    /// Builds the matcher from the configured patterns.
    ///
    /// # Errors
    /// Returns an error if a pattern is not a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| {
                MatcherError::InvalidProtectedPattern { pattern: pattern.clone(), source }
            })?;
            builder.add(glob);
        }
        Ok(Self { set: builder.build()? })
    }

    /// A matcher that protects nothing.
    #[must_use]
    pub fn none() -> Self {
        Self { set: GlobSet::empty() }
    }

    /// The path must be relative to the locale directory.
    #[must_use]
    pub fn is_protected(&self, relative_path: &Path) -> bool {
        self.set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::exact("legal.yaml", true)]
    #[case::nested_dir("archive/2019/post.yaml", true)]
    #[case::other("about.yaml", false)]
    #[case::similar_prefix("archived.yaml", false)]
    fn is_protected(#[case] path: &str, #[case] expected: bool) {
        let matcher =
            ProtectedFiles::new(&["legal.yaml".to_string(), "archive/**".to_string()]).unwrap();

        assert_that!(matcher.is_protected(Path::new(path)), eq(expected));
    }

    #[rstest]
    fn none_protects_nothing() {
        assert_that!(ProtectedFiles::none().is_protected(Path::new("common.yaml")), eq(false));
    }

    #[rstest]
    fn invalid_pattern() {
        let result = ProtectedFiles::new(&["drafts/[x".to_string()]);

        assert_that!(
            result,
            err(displays_as(contains_substring("Invalid protected file pattern 'drafts/[x'")))
        );
    }
}
