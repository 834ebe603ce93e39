use crate::error::{CompareError, Result};
use crate::tagger::TaggerKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 外部タガーコマンドを上書きする環境変数
pub const TAGGER_COMMAND_ENV: &str = "PARAM_COMPARE_TAGGER_CMD";

/// 外部タガーのタイムアウト上限（秒）
pub const MAX_TIMEOUT_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub tagger: TaggerKind,
    pub tagger_command: Option<String>,
    pub tagger_args: Vec<String>,
    /// 外部ラベル → 正規カテゴリ名
    pub label_map: HashMap<String, String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CompareError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("param-compare").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            tagger: TaggerKind::Rules,
            tagger_command: None,
            tagger_args: Vec::new(),
            label_map: HashMap::new(),
            timeout_seconds: 60,
        }
    }

    /// 外部タガーのコマンド
    pub fn tagger_command(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(cmd) = std::env::var(TAGGER_COMMAND_ENV) {
            if !cmd.trim().is_empty() {
                return Ok(cmd);
            }
        }

        self.tagger_command.clone().ok_or_else(|| {
            CompareError::Config(format!(
                "外部タガーのコマンドが未設定です（config --tagger-command または {}）",
                TAGGER_COMMAND_ENV
            ))
        })
    }

    pub fn set_tagger(&mut self, kind: TaggerKind) -> Result<()> {
        self.tagger = kind;
        self.save()
    }

    pub fn set_tagger_command(&mut self, command: String) -> Result<()> {
        self.tagger_command = Some(command);
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        Self::validate_timeout(seconds)?;
        self.timeout_seconds = seconds;
        self.save()
    }

    fn validate_timeout(seconds: u64) -> Result<()> {
        if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
            return Err(CompareError::Config(format!(
                "タイムアウトは1〜{}秒で指定してください",
                MAX_TIMEOUT_SECONDS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tagger, TaggerKind::Rules);
        assert!(config.tagger_command.is_none());
        assert!(config.tagger_args.is_empty());
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"tagger": "command", "taggerCommand": "tagger.py"}"#).unwrap();
        assert_eq!(config.tagger, TaggerKind::Command);
        assert_eq!(config.tagger_command.as_deref(), Some("tagger.py"));
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_camel_case_round_trip() {
        let mut config = Config::default();
        config.label_map.insert("MEASURE".into(), "QUANTITY".into());
        config.tagger_args = vec!["--model".into(), "en".into()];

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"labelMap\""));
        assert!(json.contains("\"timeoutSeconds\":60"));
        assert!(json.contains("\"tagger\":\"rules\""));

        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label_map["MEASURE"], "QUANTITY");
        assert_eq!(back.tagger_args, config.tagger_args);
    }

    #[test]
    fn test_validate_timeout() {
        assert!(Config::validate_timeout(60).is_ok());
        assert!(Config::validate_timeout(MAX_TIMEOUT_SECONDS).is_ok());
        assert!(matches!(Config::validate_timeout(0), Err(CompareError::Config(_))));
        assert!(matches!(Config::validate_timeout(u64::MAX), Err(CompareError::Config(_))));
    }

    #[test]
    fn test_unknown_tagger_rejected() {
        let result: std::result::Result<Config, _> = serde_json::from_str(r#"{"tagger": "spacy"}"#);
        assert!(result.is_err());
    }
}
