//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SyncSettings,
};

/// サイトルートからの既定の設定ファイルパス
pub(super) const DEFAULT_CONFIG_PATH: &str = "rosey/config.yaml";

/// 設定ファイルを読み込む
///
/// YAML として解析する（JSON も YAML のサブセットとして受け付ける）。
/// 空のファイルはデフォルト設定として扱う。
///
/// # Arguments
/// * `config_path` - 設定ファイルのパス
///
/// # Errors
/// - ファイルが存在しない
/// - ファイル読み込みエラー
/// - YAML パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<SyncSettings, ConfigError> {
    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Err(ConfigError::NotFound(config_path.to_path_buf()));
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    if content.trim().is_empty() {
        return Ok(SyncSettings::default());
    }
    let settings: SyncSettings = serde_yaml::from_str(&content)?;

    Ok(settings)
}

/// 設定ファイルのディレクトリ（相対パス解決の基準）を返す
pub(super) fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_file`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_file_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "locales:\n  - es\nbaseUrl: https://example.com\n").unwrap();

        let result = load_from_file(&config_path);

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert_eq!(settings.locales, vec!["es".to_string()]);
        assert_eq!(settings.base_url, "https://example.com");
    }

    /// `load_from_file`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&temp_dir.path().join("config.yaml"));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    /// `load_from_file`: 空ファイルはデフォルト設定
    #[rstest]
    fn test_load_from_file_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "\n").unwrap();

        let settings = load_from_file(&config_path).unwrap();

        assert!(settings.locales.is_empty());
    }

    /// `load_from_file`: YAML パースエラー
    #[rstest]
    fn test_load_from_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "locales: [es\n").unwrap();

        let result = load_from_file(&config_path);

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    #[case("rosey/config.yaml", "rosey")]
    #[case("config.yaml", ".")]
    #[case("/site/rosey/config.yaml", "/site/rosey")]
    fn test_config_dir(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(config_dir(Path::new(path)), PathBuf::from(expected));
    }
}
