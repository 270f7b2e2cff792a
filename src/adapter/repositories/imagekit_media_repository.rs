//! ImageKit Media Repository Implementation
//!
//! MediaRepositoryのImageKit実装

use anyhow::Result;
use async_trait::async_trait;

use crate::adapter::config::Config;
use crate::adapter::imagekit::client::ImageKitClient;
use crate::domain::repositories::media_repository::{
    MediaRepository, UploadError, UploadRequest, UploadedMedia,
};

/// ImageKitメディアリポジトリ
pub struct ImageKitMediaRepository {
    client: ImageKitClient,
}

impl ImageKitMediaRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Errors
    ///
    /// HTTPクライアントの作成に失敗した場合にエラーを返す
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ImageKitClient::new(config)?,
        })
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl MediaRepository for ImageKitMediaRepository {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadedMedia, UploadError> {
        self.client.upload(request).await
    }
}
