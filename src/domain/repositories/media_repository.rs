//! # Media Repository Trait
//!
//! リモートのメディアアップロードAPIを抽象化

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::transfer_result::TransferMode;

/// アップロードペイロード
///
/// 再送のたびにフォームを組み立て直すため、内容は `Bytes` で共有する
#[derive(Clone, PartialEq, Eq)]
pub enum Payload {
    /// 生のバイト列
    Binary(Bytes),
    /// base64エンコード済み文字列（ASCII）
    Encoded(Bytes),
}

impl Payload {
    /// 転送モードに従ってファイル内容からペイロードを作成
    pub fn from_bytes(mode: TransferMode, bytes: Vec<u8>) -> Self {
        match mode {
            TransferMode::Binary => Payload::Binary(Bytes::from(bytes)),
            TransferMode::Encoded => Payload::encoded(general_purpose::STANDARD.encode(bytes)),
        }
    }

    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Payload::Binary(bytes.into())
    }

    pub fn encoded(encoded: impl Into<String>) -> Self {
        Payload::Encoded(Bytes::from(encoded.into()))
    }

    /// 送信する内容（参照カウントの複製のみでコピーしない）
    pub fn body(&self) -> Bytes {
        match self {
            Payload::Binary(bytes) | Payload::Encoded(bytes) => bytes.clone(),
        }
    }

    pub fn mode(&self) -> TransferMode {
        match self {
            Payload::Binary(_) => TransferMode::Binary,
            Payload::Encoded(_) => TransferMode::Encoded,
        }
    }

    /// 送信されるペイロードのバイト数
    pub fn len(&self) -> usize {
        match self {
            Payload::Binary(bytes) | Payload::Encoded(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// 動画ファイルの中身をログに出さない
impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Payload")
            .field("mode", &self.mode())
            .field("len", &self.len())
            .finish()
    }
}

/// アップロードリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub payload: Payload,
    pub file_name: String,
    pub folder: String,
    /// `false` の場合、サーバー側でファイル名を変更しない
    pub use_unique_file_name: bool,
    pub tags: Vec<String>,
}

/// アップロード済みメディア
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub file_id: Option<String>,
    pub file_path: Option<String>,
}

impl UploadedMedia {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file_id: None,
            file_path: None,
        }
    }
}

/// アップロードエラー
///
/// `message` はAPIが返したメッセージをそのまま保持する
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct UploadError {
    pub message: String,
    /// APIが返した対処方法のヒント
    pub help: Option<String>,
    /// HTTPステータスコード（通信エラーの場合は `None`）
    pub status: Option<u16>,
    /// 同じリクエストを再送して回復する可能性があるか
    pub retryable: bool,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
            status: None,
            retryable: false,
        }
    }

    pub fn with_help(mut self, help: Option<String>) -> Self {
        self.help = help;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

/// メディアリポジトリ
///
/// リモートのアップロードAPIへの送信を担当する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// メディアをアップロード
    ///
    /// 同じ `folder` と `file_name` で再度アップロードした場合は上書きされる
    ///
    /// # Errors
    ///
    /// APIがエラーを返した場合、または通信に失敗した場合にエラーを返す
    async fn upload(&self, request: &UploadRequest) -> Result<UploadedMedia, UploadError>;
}
