use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};
use spermvision_common::{MockAnalyzer, StaleResultPolicy};
use std::path::PathBuf;

/// 乱数シードの環境変数
pub const SEED_ENV: &str = "SPERMVISION_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub failure_rate: f64,
    pub stale_results: StaleResultPolicy,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_delay_ms: spermvision_common::mock::DEFAULT_MIN_DELAY_MS,
            max_delay_ms: spermvision_common::mock::DEFAULT_MAX_DELAY_MS,
            failure_rate: 0.0,
            stale_results: StaleResultPolicy::Apply,
            seed: None,
        }
    }
}

impl Config {
    /// 保存済みの設定を読む（環境変数は反映しない）
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VisionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("spermvision").join("config.json"))
    }

    /// `SPERMVISION_SEED` の値（数値でなければ無視）
    pub fn env_seed() -> Option<u64> {
        let value = std::env::var(SEED_ENV).ok()?;
        match value.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!(%value, "{} is not a number, ignored", SEED_ENV);
                None
            }
        }
    }

    /// 実行時に使うシード（環境変数 > 設定ファイル）
    pub fn effective_seed(&self) -> Option<u64> {
        Self::env_seed().or(self.seed)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_delay_ms >= self.max_delay_ms {
            return Err(VisionError::Config(format!(
                "min_delay_ms ({}) は max_delay_ms ({}) より小さくしてください",
                self.min_delay_ms, self.max_delay_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(VisionError::Config(format!(
                "failure_rate ({}) は 0〜1 の範囲で指定してください",
                self.failure_rate
            )));
        }
        Ok(())
    }

    pub fn analyzer(&self) -> Result<MockAnalyzer> {
        Ok(MockAnalyzer::new()
            .with_delay_range(self.min_delay_ms, self.max_delay_ms)?
            .with_failure_rate(self.failure_rate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_matches_mock_contract() {
        let config = Config::default();
        assert_eq!(config.min_delay_ms, 3000);
        assert_eq!(config.max_delay_ms, 5000);
        assert_eq!(config.stale_results, StaleResultPolicy::Apply);
        assert!(config.validate().is_ok());
        assert_eq!(config.analyzer().unwrap().delay_range_ms(), (3000, 5000));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            failure_rate: 0.25,
            stale_results: StaleResultPolicy::Discard,
            seed: Some(9),
            ..Default::default()
        };
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).expect("設定読込失敗");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"stale_results": "discard"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.stale_results, StaleResultPolicy::Discard);
        assert_eq!(loaded.max_delay_ms, 5000);
    }

    #[test]
    fn test_env_seed_is_not_persisted() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");

        std::env::set_var(SEED_ENV, "777");
        let mut config = Config::load_from(&path).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.effective_seed(), Some(777));

        config.failure_rate = 0.5;
        config.save_to(&path).unwrap();
        std::env::remove_var(SEED_ENV);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.seed, None);
        assert_eq!(reloaded.effective_seed(), None);
        assert_eq!(reloaded.failure_rate, 0.5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let inverted = Config { min_delay_ms: 6000, ..Default::default() };
        assert!(matches!(inverted.validate(), Err(VisionError::Config(_))));

        let rate = Config { failure_rate: 2.0, ..Default::default() };
        assert!(rate.validate().is_err());

        let dir = tempdir().unwrap();
        assert!(rate.save_to(&dir.path().join("c.json")).is_err());
    }
}
