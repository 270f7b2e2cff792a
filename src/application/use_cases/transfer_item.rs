//! # Transfer Item Use Case
//!
//! 1アイテムの転送ユースケース（存在確認 → モード選択 → アップロード）

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;
use tokio::time::sleep;

use crate::application::dto::pipeline_config::PipelineConfig;
use crate::domain::entities::transfer_result::TransferResult;
use crate::domain::entities::upload_item::UploadItem;
use crate::domain::repositories::media_repository::{MediaRepository, Payload, UploadRequest};
use crate::domain::repositories::source_repository::SourceRepository;
use crate::domain::services::transfer_mode::select_transfer_mode;

/// バイト数を人が読みやすい形式にする
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let b = bytes as f64;
    if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// アイテム転送ユースケース
///
/// 想定されるエラー（ファイルなし、APIエラー）は失敗結果として返す。
/// 存在確認後のI/Oエラーなど想定外のエラーのみ `Err` として返す。
pub struct TransferItemUseCase<S: SourceRepository, M: MediaRepository> {
    source_repository: Arc<S>,
    media_repository: Arc<M>,
    config: PipelineConfig,
}

impl<S: SourceRepository, M: MediaRepository> TransferItemUseCase<S, M> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `source_repository` - ローカルファイルのリポジトリ
    /// * `media_repository` - リモートのアップロードAPI
    /// * `config` - パイプライン設定
    pub fn new(source_repository: Arc<S>, media_repository: Arc<M>, config: PipelineConfig) -> Self {
        Self {
            source_repository,
            media_repository,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// アイテムを転送する
    ///
    /// # Errors
    ///
    /// 存在を判定できない場合、または存在が確認できたファイルの読み込みに失敗した場合にエラーを返す
    pub async fn execute(&self, item: &UploadItem) -> Result<TransferResult> {
        println!(
            "→ Uploading {} to {}",
            item.local_path().display(),
            item.remote_path()
        );

        let path = self.config.resolve_path(item.local_path());

        let exists = self
            .source_repository
            .exists(&path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?;

        if !exists {
            println!("✗ File not found: {}", path.display());
            return Ok(TransferResult::not_found(item.clone()));
        }

        let size = self
            .source_repository
            .size(&path)
            .await
            .with_context(|| format!("Failed to read size of {}", path.display()))?;

        let mode = select_transfer_mode(size, self.config.size_threshold);
        println!("  Size: {} ({} bytes), mode: {}", format_size(size), size, mode);

        let bytes = self
            .source_repository
            .read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let request = UploadRequest {
            payload: Payload::from_bytes(mode, bytes),
            file_name: item.file_name().to_string(),
            folder: item.folder().to_string(),
            use_unique_file_name: self.config.use_unique_file_name,
            tags: self.config.tags.clone(),
        };
        debug!("Prepared upload request: {:?}", request);

        let retry = self.config.retry;
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.media_repository.upload(&request).await {
                Ok(media) => {
                    println!("✓ Uploaded {}: {}", item.file_name(), media.url);
                    if let Some(file_id) = &media.file_id {
                        debug!("Remote file id for {}: {}", item.file_name(), file_id);
                    }
                    return Ok(TransferResult::success(
                        item.clone(),
                        media.url,
                        mode,
                        attempts,
                    ));
                }
                Err(e) => {
                    if e.retryable && retry.allows(attempts) {
                        let delay = retry.delay_for(attempts);
                        println!(
                            "⚠ Upload of {} failed (attempt {}), retrying in {}ms: {}",
                            item.file_name(),
                            attempts,
                            delay.as_millis(),
                            e
                        );
                        sleep(delay).await;
                        continue;
                    }

                    println!("✗ Failed to upload {}: {}", item.file_name(), e);
                    if let Some(help) = &e.help {
                        println!("  Help: {}", help);
                    }
                    return Ok(TransferResult::failure(
                        item.clone(),
                        e.message,
                        Some(mode),
                        attempts,
                    ));
                }
            }
        }
    }
}
