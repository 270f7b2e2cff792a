//! # TransferResult Value Object
//!
//! アイテムごとの転送結果

use std::fmt;

use super::upload_item::UploadItem;

/// ローカルファイルが存在しない場合の失敗理由
pub const FILE_NOT_FOUND: &str = "file not found";

/// 転送モード
///
/// ファイルサイズに応じてペイロードの表現を切り替える
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferMode {
    /// 生のバイト列をそのまま送信
    Binary,
    /// base64エンコードした文字列を送信
    Encoded,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Binary => write!(f, "binary"),
            TransferMode::Encoded => write!(f, "base64"),
        }
    }
}

/// 転送の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success { url: String },
    Failure { reason: String },
}

/// 転送結果
///
/// アイテム1件につき必ず1つ生成される
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub item: UploadItem,
    pub outcome: TransferOutcome,
    /// 選択された転送モード（ファイルが存在しない場合は `None`）
    pub mode: Option<TransferMode>,
    /// リモートAPIの呼び出し回数
    pub attempts: u32,
}

impl TransferResult {
    pub fn success(item: UploadItem, url: String, mode: TransferMode, attempts: u32) -> Self {
        Self {
            item,
            outcome: TransferOutcome::Success { url },
            mode: Some(mode),
            attempts,
        }
    }

    pub fn failure(
        item: UploadItem,
        reason: impl Into<String>,
        mode: Option<TransferMode>,
        attempts: u32,
    ) -> Self {
        Self {
            item,
            outcome: TransferOutcome::Failure {
                reason: reason.into(),
            },
            mode,
            attempts,
        }
    }

    /// ローカルファイルが見つからなかった場合の結果
    pub fn not_found(item: UploadItem) -> Self {
        Self::failure(item, FILE_NOT_FOUND, None, 0)
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TransferOutcome::Success { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match &self.outcome {
            TransferOutcome::Success { url } => Some(url),
            TransferOutcome::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            TransferOutcome::Success { .. } => None,
            TransferOutcome::Failure { reason } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> UploadItem {
        UploadItem::new("videos/hero.mp4", "hero.mp4", "/videos")
    }

    #[test]
    fn test_success_result() {
        let result = TransferResult::success(
            item(),
            "https://ik.imagekit.io/demo/videos/hero.mp4".to_string(),
            TransferMode::Binary,
            1,
        );

        assert!(result.is_success());
        assert_eq!(
            result.url(),
            Some("https://ik.imagekit.io/demo/videos/hero.mp4")
        );
        assert_eq!(result.reason(), None);
        assert_eq!(result.mode, Some(TransferMode::Binary));
    }

    #[test]
    fn test_not_found_result() {
        let result = TransferResult::not_found(item());

        assert!(!result.is_success());
        assert_eq!(result.reason(), Some(FILE_NOT_FOUND));
        assert_eq!(result.mode, None);
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn test_transfer_mode_display() {
        assert_eq!(TransferMode::Binary.to_string(), "binary");
        assert_eq!(TransferMode::Encoded.to_string(), "base64");
    }
}
