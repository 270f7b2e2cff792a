//! Configuration
//!
//! 設定ファイル（JSON）と環境変数からの設定読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::application::dto::pipeline_config::{PipelineConfig, DEFAULT_ITEM_DELAY_MS, DEFAULT_TAG};
use crate::domain::services::retry_policy::RetryPolicy;
use crate::domain::services::transfer_mode::DEFAULT_SIZE_THRESHOLD;

pub const ENV_PUBLIC_KEY: &str = "IMAGEKIT_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "IMAGEKIT_PRIVATE_KEY";
pub const ENV_URL_ENDPOINT: &str = "IMAGEKIT_URL_ENDPOINT";
pub const ENV_UPLOAD_ENDPOINT: &str = "IMAGEKIT_UPLOAD_ENDPOINT";

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://upload.imagekit.io/api/v1/files/upload";
/// リクエスト全体（本文の送信を含む）のタイムアウト
///
/// 数百MBの動画を遅い回線で送る場合は大きくするか `0`（無制限）にする
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// 設定の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration: {field} (set it in the config file or {env})")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub url_endpoint: String,
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,

    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_size_threshold")]
    pub size_threshold_bytes: u64,
    #[serde(default = "default_item_delay_ms")]
    pub item_delay_ms: u64,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub use_unique_file_name: bool,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_upload_endpoint() -> String {
    DEFAULT_UPLOAD_ENDPOINT.to_string()
}

fn default_base_dir() -> String {
    ".".to_string()
}

fn default_size_threshold() -> u64 {
    DEFAULT_SIZE_THRESHOLD
}

fn default_item_delay_ms() -> u64 {
    DEFAULT_ITEM_DELAY_MS
}

fn default_tags() -> Vec<String> {
    vec![DEFAULT_TAG.to_string()]
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            url_endpoint: String::new(),
            upload_endpoint: default_upload_endpoint(),
            base_dir: default_base_dir(),
            size_threshold_bytes: default_size_threshold(),
            item_delay_ms: default_item_delay_ms(),
            tags: default_tags(),
            use_unique_file_name: false,
            max_retries: 0,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// 設定ファイルと環境変数から設定を読み込む
    ///
    /// ファイルが存在しない場合はデフォルト値から開始する（認証情報は環境変数で渡す）。
    /// 環境変数はファイルの値より優先される。
    pub fn load(path: &str) -> Result<Self> {
        let config = Self::from_file_or_default(path)?
            .with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file_or_default(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).to_string();
        let path = Path::new(&expanded);

        if !path.exists() {
            log::info!(
                "Config file {} not found, using defaults and environment",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// 環境変数で認証情報とエンドポイントを上書きする
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty(ENV_PUBLIC_KEY) {
            self.public_key = v;
        }
        if let Some(v) = non_empty(ENV_PRIVATE_KEY) {
            self.private_key = v;
        }
        if let Some(v) = non_empty(ENV_URL_ENDPOINT) {
            self.url_endpoint = v;
        }
        if let Some(v) = non_empty(ENV_UPLOAD_ENDPOINT) {
            self.upload_endpoint = v;
        }
        self
    }

    /// 必須項目と値の範囲を検証する
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.public_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "public_key",
                env: ENV_PUBLIC_KEY,
            });
        }
        if self.private_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "private_key",
                env: ENV_PRIVATE_KEY,
            });
        }
        if self.url_endpoint.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "url_endpoint",
                env: ENV_URL_ENDPOINT,
            });
        }

        for (name, url) in [
            ("url_endpoint", &self.url_endpoint),
            ("upload_endpoint", &self.upload_endpoint),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.size_threshold_bytes == 0 {
            return Err(ConfigError::Invalid(
                "size_threshold_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// ベースディレクトリ（`~` 展開済み）
    pub fn base_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.base_dir).to_string())
    }

    /// 画面表示用にマスクした公開鍵
    pub fn masked_public_key(&self) -> String {
        mask_secret(&self.public_key)
    }

    /// リクエスト全体のタイムアウト（`0` の場合は無制限）
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    /// パイプライン設定に変換
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            base_dir: self.base_dir_path(),
            size_threshold: self.size_threshold_bytes,
            item_delay: Duration::from_millis(self.item_delay_ms),
            tags: self.tags.clone(),
            use_unique_file_name: self.use_unique_file_name,
            retry: RetryPolicy::new(self.max_retries),
        }
    }
}

/// 先頭数文字以外を伏せる
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    if secret.chars().count() <= 6 {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}***", visible)
    }
}
