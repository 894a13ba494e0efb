//! Run orchestrator: drives every locale through prune, page and common
//! reconciliation.

use futures::stream::{
    self,
    StreamExt,
};

use super::common::sync_common;
use super::page::sync_page;
use super::prune::prune_stale_files;
use super::types::{
    LocaleContext,
    LocaleReport,
    LocaleSummary,
    SyncReport,
};
use crate::config::{
    ProtectedFiles,
    SyncSettings,
};
use crate::error::SyncError;
use crate::input::inventory::{
    KeyInventory,
    PageInventory,
    load_key_inventory,
    load_page_inventory,
};
use crate::input::vendor::load_vendor_feed;
use crate::markup::{
    HtmlToMarkdown,
    MarkupConverter,
};
use crate::paths::{
    check_file_owner,
    file_owners,
    locale_dir,
};

/// Synchronizes the working files of every configured locale.
#[derive(Debug)]
pub struct Orchestrator<C = HtmlToMarkdown> {
    /// Resolved settings of the run
    settings: SyncSettings,
    /// Matcher for files the pruner keeps
    protected: ProtectedFiles,
    /// Vendor snippet converter
    converter: C,
}

impl Orchestrator {
    /// Creates an orchestrator that converts vendor HTML to Markdown.
    ///
    /// # Errors
    /// Returns an error if a protected file pattern is invalid.
    pub fn new(settings: SyncSettings) -> Result<Self, SyncError> {
        Self::with_converter(settings, HtmlToMarkdown)
    }
}

impl<C: MarkupConverter> Orchestrator<C> {
    /// # Errors
    /// Returns an error if a protected file pattern is invalid.
    pub fn with_converter(settings: SyncSettings, converter: C) -> Result<Self, SyncError> {
        let protected = ProtectedFiles::new(&settings.protected_files)?;
        Ok(Self { settings, protected, converter })
    }

    /// Runs one full sync.
    ///
    /// Locales are processed one after another; a failing locale is recorded
    /// in the report and does not stop the others.
    ///
    /// # Errors
    /// Returns an error if an inventory file is missing or malformed. Nothing
    /// is written in that case.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let paths = &self.settings.paths;
        let keys = load_key_inventory(&paths.key_inventory_file).await?;
        let pages = load_page_inventory(&paths.page_inventory_file).await?;

        for key in keys.reserved_keys() {
            tracing::warn!(%key, "Skipping key that clashes with working file metadata");
        }
        tracing::info!(
            keys = keys.keys.len(),
            pages = pages.len(),
            locales = self.settings.locales.len(),
            "Starting translation sync"
        );

        let mut report = SyncReport::default();
        for locale in &self.settings.locales {
            let outcome = self.sync_locale(locale, &keys, &pages).await;
            match &outcome {
                Ok(summary) => tracing::info!(
                    %locale,
                    pages_written = summary.pages_written,
                    pages_skipped = summary.pages_skipped,
                    files_pruned = summary.files_pruned.len(),
                    common_keys = summary.common_keys,
                    pending = summary.entries.pending,
                    "Locale synchronized"
                ),
                Err(error) => tracing::error!(%locale, %error, "Locale sync failed"),
            }
            report.locales.push(LocaleReport { locale: locale.clone(), outcome });
        }

        Ok(report)
    }

    /// Prunes, then reconciles every page and finally the common file.
    ///
    /// The common file is only written when every page succeeded.
    async fn sync_locale(
        &self,
        locale: &str,
        keys: &KeyInventory,
        pages: &PageInventory,
    ) -> Result<LocaleSummary, SyncError> {
        let paths = &self.settings.paths;
        let dir = locale_dir(&paths.working_files_dir, locale);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| SyncError::CreateDir { path: dir.clone(), source })?;

        let files_pruned = prune_stale_files(locale, &dir, pages, &self.protected).await?;
        let vendor = load_vendor_feed(&paths.vendor_feed_dir, locale).await?;

        let ctx = LocaleContext {
            locale,
            base_url: &self.settings.base_url,
            working_files_dir: &paths.working_files_dir,
            keys,
            vendor: &vendor,
            converter: &self.converter,
        };

        let owners = file_owners(pages.pages());
        let results: Vec<_> = stream::iter(pages.pages())
            .map(|page| {
                let owned = check_file_owner(page, &owners);
                async move {
                    let result = match owned {
                        Ok(()) => sync_page(page, &ctx).await,
                        Err(error) => Err(error),
                    };
                    (page, result)
                }
            })
            .buffered(self.settings.tuning.page_concurrency())
            .collect()
            .await;

        let mut summary = LocaleSummary { files_pruned, ..LocaleSummary::default() };
        let mut first_error = None;
        for (page, result) in results {
            match result {
                Ok(outcome) => {
                    summary.pages_written += 1;
                    summary.entries.absorb(outcome.entries);
                }
                Err(error @ SyncError::InvalidPagePath { .. }) => {
                    tracing::warn!(%locale, %error, "Skipping page");
                    summary.pages_skipped += 1;
                }
                Err(error) => {
                    tracing::error!(%locale, %page, %error, "Failed to update translation file");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        let common = sync_common(&ctx).await?;
        summary.common_keys = common.entries.total();
        summary.entries.absorb(common.entries);

        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;
    use std::path::{
        Path,
        PathBuf,
    };

    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::config::PathsConfig;
    use crate::test_utils::TagStripConverter;

    struct Site {
        dir: TempDir,
    }

    impl Site {
        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn translations(&self) -> PathBuf {
            self.root().join("rosey/translations")
        }

        fn write(&self, relative: &str, content: &str) {
            let path = self.root().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn settings(&self, locales: &[&str]) -> SyncSettings {
            SyncSettings {
                locales: locales.iter().map(ToString::to_string).collect(),
                base_url: "https://example.com".to_string(),
                paths: PathsConfig::default().resolved_against(&self.root().join("rosey")),
                ..SyncSettings::default()
            }
        }
    }

    #[fixture]
    fn site() -> Site {
        let site = Site { dir: TempDir::new().unwrap() };
        site.write(
            "rosey/base.json",
            &json!({
                "keys": {
                    "title": { "original": "About Us", "pages": { "about.html": true } },
                    "common:nav": { "original": "Home", "pages": { "about.html": true } },
                    "_meta": { "original": "x", "pages": { "about.html": true } }
                }
            })
            .to_string(),
        );
        site.write("rosey/base.urls.json", &json!({ "keys": { "about.html": {} } }).to_string());
        site
    }

    #[rstest]
    #[tokio::test]
    async fn run_writes_page_and_common_files(site: Site) {
        site.write("rosey/incoming/es.json", &json!({ "title": "<p>Sobre</p>" }).to_string());
        let orchestrator =
            Orchestrator::with_converter(site.settings(&["es"]), TagStripConverter).unwrap();

        let report = orchestrator.run().await.unwrap();

        assert_that!(report.is_success(), eq(true));
        let summary = report.summary("es").unwrap();
        assert_that!(summary.pages_written, eq(1));
        assert_that!(summary.common_keys, eq(1));
        assert_that!(summary.entries.from_vendor, eq(1));
        let about = fs::read_to_string(site.translations().join("es/about.yaml")).unwrap();
        assert_that!(about, contains_substring("title: Sobre"));
        assert_that!(about, not(contains_substring("_meta:")));
        assert!(site.translations().join("es/common.yaml").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn run_fails_without_inventory() {
        let site = Site { dir: TempDir::new().unwrap() };
        let orchestrator =
            Orchestrator::with_converter(site.settings(&["es"]), TagStripConverter).unwrap();

        let result = orchestrator.run().await;

        assert!(matches!(result, Err(SyncError::MissingInventory(_))));
        assert!(!site.translations().exists());
    }

    #[rstest]
    #[tokio::test]
    async fn failing_locale_does_not_stop_others(site: Site) {
        site.write("rosey/translations/es/about.yaml", "title: [broken\n");
        site.write("rosey/translations/es/common.yaml", "common:nav: Inicio\n");
        let orchestrator =
            Orchestrator::with_converter(site.settings(&["es", "fr"]), TagStripConverter).unwrap();

        let report = orchestrator.run().await.unwrap();

        assert_that!(report.is_success(), eq(false));
        let failures: Vec<_> = report.failures().map(|(locale, _)| locale).collect();
        assert_that!(failures, elements_are![eq(&"es")]);
        assert_that!(report.summary("fr"), some(anything()));
        // Common file of the failed locale is left untouched.
        let common = fs::read_to_string(site.translations().join("es/common.yaml")).unwrap();
        assert_that!(common, eq("common:nav: Inicio\n"));
    }

    #[rstest]
    #[tokio::test]
    async fn unmappable_pages_are_skipped(site: Site) {
        site.write(
            "rosey/base.urls.json",
            &json!({ "keys": { "about.html": {}, "../escape.html": {}, "common.html": {} } }).to_string(),
        );
        let orchestrator =
            Orchestrator::with_converter(site.settings(&["es"]), TagStripConverter).unwrap();

        let report = orchestrator.run().await.unwrap();

        let summary = report.summary("es").unwrap();
        assert_that!(summary.pages_written, eq(1));
        assert_that!(summary.pages_skipped, eq(2));
        assert!(!site.root().join("rosey/translations/escape.yaml").exists());
    }

    #[rstest]
    #[tokio::test]
    async fn pages_sharing_a_working_file_keep_the_first(site: Site) {
        site.write(
            "rosey/base.json",
            &json!({
                "keys": {
                    "title": { "original": "About Us", "pages": { "about.html": true } },
                    "team": { "original": "Our team", "pages": { "about/index.html": true } }
                }
            })
            .to_string(),
        );
        site.write("rosey/base.urls.json", &json!({ "keys": { "about.html": {}, "about/index.html": {} } }).to_string());
        site.write("rosey/translations/es/about.yaml", "title: Acerca de\nteam: Equipo\n");
        let mut settings = site.settings(&["es"]);
        settings.tuning.max_concurrent_pages = Some(1);
        let orchestrator = Orchestrator::with_converter(settings, TagStripConverter).unwrap();

        let report = orchestrator.run().await.unwrap();

        let summary = report.summary("es").unwrap();
        assert_that!(summary.pages_written, eq(1));
        assert_that!(summary.pages_skipped, eq(1));
        let about: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(site.translations().join("es/about.yaml")).unwrap()).unwrap();
        assert_that!(about["title"].as_str(), some(eq("Acerca de")));
        assert_that!(about["urlTranslation"].as_str(), some(eq("about.html")));
        assert_that!(about.get("team"), none());
    }

    #[rstest]
    #[tokio::test]
    async fn run_prunes_stale_files(site: Site) {
        site.write("rosey/translations/es/old-page.yaml", "title: Viejo\n");
        let orchestrator =
            Orchestrator::with_converter(site.settings(&["es"]), TagStripConverter).unwrap();

        let report = orchestrator.run().await.unwrap();

        let summary = report.summary("es").unwrap();
        assert_that!(summary.files_pruned, elements_are![eq(&site.translations().join("es/old-page.yaml"))]);
        assert!(!site.translations().join("es/old-page.yaml").exists());
    }

    #[rstest]
    fn invalid_protected_pattern_is_rejected() {
        let settings = SyncSettings { protected_files: vec!["[".to_string()], ..SyncSettings::default() };

        let result = Orchestrator::new(settings);

        assert!(matches!(result, Err(SyncError::Matcher(_))));
    }
}
