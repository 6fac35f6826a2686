use crate::error::{InterliningError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 台帳ファイルの既定名（作業ディレクトリ直下）
pub const DEFAULT_DATA_FILE: &str = "Interlining_Data.xlsx";

/// 台帳ファイルを上書きする環境変数
pub const DATA_FILE_ENV: &str = "INTERLINING_DATA_FILE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InterliningError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("interlining").join("config.json"))
    }

    /// 台帳ファイルのパスを決定
    ///
    /// 優先順位: CLI引数 > 環境変数 > 設定ファイル
    pub fn resolve_data_file(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }
        match std::env::var_os(DATA_FILE_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.data_file.clone(),
        }
    }

    pub fn set_data_file(&mut self, path: PathBuf) -> Result<()> {
        self.data_file = path;
        self.save()
    }
}
