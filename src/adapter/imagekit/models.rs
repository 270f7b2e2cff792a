//! ImageKit API Models
//!
//! Upload API のレスポンス表現

use serde::Deserialize;

use crate::domain::repositories::media_repository::UploadedMedia;

/// アップロード成功時のレスポンス
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub file_type: Option<String>,
}

/// エラー時のレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub help: Option<String>,
}

impl From<UploadResponse> for UploadedMedia {
    fn from(response: UploadResponse) -> Self {
        Self {
            url: response.url,
            file_id: response.file_id,
            file_path: response.file_path,
        }
    }
}
