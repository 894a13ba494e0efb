//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SyncSettings,
    ValidationError,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定（パスは解決済み）
    current_settings: SyncSettings,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SyncSettings::default() }
    }

    /// 既定の設定ファイルパス（`rosey/config.yaml`）
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(loader::DEFAULT_CONFIG_PATH)
    }

    /// 設定を読み込む
    ///
    /// 相対パスは設定ファイルのディレクトリを基準に解決する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - YAML パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_path);

        let settings = loader::load_from_file(config_path)?;
        let config_dir = loader::config_dir(config_path);

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        // 設定を保存
        self.current_settings =
            SyncSettings { paths: settings.paths.resolved_against(&config_dir), ..settings };
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 処理対象のロケールを絞り込む
    ///
    /// 空のリストを渡した場合は何もしない。
    ///
    /// # Errors
    /// - 設定されていないロケールが指定された
    pub fn restrict_locales(&mut self, only: &[String]) -> Result<(), ConfigError> {
        if only.is_empty() {
            return Ok(());
        }

        let errors: Vec<_> = only
            .iter()
            .filter(|locale| !self.current_settings.locales.contains(locale))
            .map(|locale| {
                ValidationError::new("locales", format!("Locale '{locale}' is not configured"))
            })
            .collect();
        if !errors.is_empty() {
            return Err(ConfigError::ValidationErrors(errors));
        }

        self.current_settings.locales.retain(|locale| only.contains(locale));
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SyncSettings {
        &self.current_settings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join("config.yaml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert!(manager.get_settings().locales.is_empty());
    }

    /// `load_settings`: 相対パスが設定ファイル基準で解決される
    #[rstest]
    fn test_load_settings_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            temp_dir.path(),
            "locales: [es]\npaths:\n  workingFilesDir: translations\n",
        );

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(&config_path);

        assert!(result.is_ok());
        let settings = manager.get_settings();
        assert_eq!(settings.paths.working_files_dir, temp_dir.path().join("translations"));
        assert_eq!(settings.paths.key_inventory_file, temp_dir.path().join("base.json"));
    }

    /// `load_settings`: バリデーションエラー
    #[rstest]
    fn test_load_settings_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path(), "baseUrl: https://example.com\n");

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(&config_path);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(manager.get_settings().base_url.is_empty());
    }

    /// `restrict_locales`: 指定したロケールのみ残る
    #[rstest]
    fn test_restrict_locales() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path(), "locales: [es, fr, de]\n");
        let mut manager = ConfigManager::new();
        manager.load_settings(&config_path).unwrap();

        let result = manager.restrict_locales(&["de".to_string(), "es".to_string()]);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().locales, vec!["es".to_string(), "de".to_string()]);
    }

    /// `restrict_locales`: 未設定のロケールはエラー
    #[rstest]
    fn test_restrict_locales_unknown() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path(), "locales: [es]\n");
        let mut manager = ConfigManager::new();
        manager.load_settings(&config_path).unwrap();

        let result = manager.restrict_locales(&["it".to_string()]);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().locales, vec!["es".to_string()]);
    }
}
