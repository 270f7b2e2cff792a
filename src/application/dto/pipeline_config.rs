//! # Pipeline Configuration DTO
//!
//! アップロードパイプラインの設定のData Transfer Object

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::services::retry_policy::RetryPolicy;
use crate::domain::services::transfer_mode::DEFAULT_SIZE_THRESHOLD;

/// アイテム間のデフォルト待機時間
pub const DEFAULT_ITEM_DELAY_MS: u64 = 1000;

/// デフォルトの分類タグ
pub const DEFAULT_TAG: &str = "website-asset";

/// パイプライン設定
///
/// プロセス起動時に一度だけ構築され、各ユースケースに渡される
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// マニフェストの相対パスを解決するベースディレクトリ
    pub base_dir: PathBuf,
    /// このバイト数を超えるファイルはバイナリで送信
    pub size_threshold: u64,
    /// アイテム間の待機時間（レート制限対策）
    pub item_delay: Duration,
    /// アップロード時に付与するタグ
    pub tags: Vec<String>,
    /// サーバー側でのファイル名変更を許可するか
    pub use_unique_file_name: bool,
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            size_threshold: DEFAULT_SIZE_THRESHOLD,
            item_delay: Duration::from_millis(DEFAULT_ITEM_DELAY_MS),
            tags: vec![DEFAULT_TAG.to_string()],
            use_unique_file_name: false,
            retry: RetryPolicy::disabled(),
        }
    }
}

impl PipelineConfig {
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_size_threshold(mut self, size_threshold: u64) -> Self {
        self.size_threshold = size_threshold;
        self
    }

    pub fn with_item_delay(mut self, item_delay: Duration) -> Self {
        self.item_delay = item_delay;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// マニフェストのパスをベースディレクトリ基準で解決する
    ///
    /// 絶対パスはそのまま返す
    pub fn resolve_path(&self, local_path: &Path) -> PathBuf {
        if local_path.is_absolute() {
            local_path.to_path_buf()
        } else {
            self.base_dir.join(local_path)
        }
    }
}
