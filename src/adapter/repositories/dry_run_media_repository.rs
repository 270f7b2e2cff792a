//! Dry-run Media Repository Implementation
//!
//! ネットワークに接続せず、アップロード後のURLを予測して返す

use async_trait::async_trait;
use log::info;

use crate::domain::repositories::media_repository::{
    MediaRepository, UploadError, UploadRequest, UploadedMedia,
};

/// URLエンドポイントとフォルダ、ファイル名から配信URLを組み立てる
pub fn build_media_url(url_endpoint: &str, folder: &str, file_name: &str) -> String {
    let endpoint = url_endpoint.trim_end_matches('/');
    let folder = folder.trim_matches('/');

    if folder.is_empty() {
        format!("{}/{}", endpoint, file_name)
    } else {
        format!("{}/{}/{}", endpoint, folder, file_name)
    }
}

/// ドライランメディアリポジトリ
pub struct DryRunMediaRepository {
    url_endpoint: String,
}

impl DryRunMediaRepository {
    pub fn new(url_endpoint: impl Into<String>) -> Self {
        Self {
            url_endpoint: url_endpoint.into(),
        }
    }
}

#[async_trait]
impl MediaRepository for DryRunMediaRepository {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadedMedia, UploadError> {
        info!(
            "DRY RUN - would upload {} ({} {} bytes) to {}",
            request.file_name,
            request.payload.mode(),
            request.payload.len(),
            request.folder
        );

        let url = build_media_url(&self.url_endpoint, &request.folder, &request.file_name);
        let mut media = UploadedMedia::new(url);
        media.file_path = Some(build_media_url("", &request.folder, &request.file_name));
        Ok(media)
    }
}
