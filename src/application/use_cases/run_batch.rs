//! # Run Batch Use Case
//!
//! マニフェストを先頭から1件ずつ転送し、結果を集計するユースケース

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::time::Duration;
use tokio::time::sleep;

use super::transfer_item::TransferItemUseCase;
use crate::domain::entities::batch_summary::BatchSummary;
use crate::domain::entities::manifest::Manifest;
use crate::domain::entities::transfer_result::TransferResult;
use crate::domain::repositories::media_repository::MediaRepository;
use crate::domain::repositories::source_repository::SourceRepository;

/// バッチ実行レポート
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// マニフェストと同じ順序の転送結果
    pub results: Vec<TransferResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &TransferResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// バッチ実行ユースケース
///
/// 並行実行はせず、アイテム間で `item_delay` だけ待機する（最後のアイテムの後は待たない）
pub struct RunBatchUseCase<S: SourceRepository, M: MediaRepository> {
    transfer_use_case: TransferItemUseCase<S, M>,
}

impl<S: SourceRepository, M: MediaRepository> RunBatchUseCase<S, M> {
    pub fn new(transfer_use_case: TransferItemUseCase<S, M>) -> Self {
        Self { transfer_use_case }
    }

    /// マニフェストの全アイテムを1回ずつ転送する
    ///
    /// 転送中のエラーは失敗として集計され、バッチは中断しない
    pub async fn execute(&self, manifest: &Manifest) -> BatchReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let item_delay: Duration = self.transfer_use_case.config().item_delay;
        let total = manifest.len();

        info!("Starting batch {} with {} items", run_id, total);

        let mut summary = BatchSummary::new();
        let mut results = Vec::with_capacity(total);

        for (i, item) in manifest.iter().enumerate() {
            println!("[{}/{}] {}", i + 1, total, item.file_name());

            let result = match self.transfer_use_case.execute(item).await {
                Ok(result) => result,
                Err(e) => {
                    let reason = format!("{:#}", e);
                    warn!("Unexpected error for {}: {}", item.local_path().display(), reason);
                    println!("✗ Failed to upload {}: {}", item.file_name(), reason);
                    TransferResult::failure(item.clone(), reason, None, 0)
                }
            };

            summary.record(&result);
            results.push(result);

            if i + 1 < total && !item_delay.is_zero() {
                sleep(item_delay).await;
            }
        }

        let finished_at = Utc::now();
        info!(
            "Finished batch {}: {} succeeded, {} failed",
            run_id, summary.success_count, summary.failed_count
        );

        BatchReport {
            run_id,
            started_at,
            finished_at,
            results,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use crate::application::dto::pipeline_config::PipelineConfig;
    use crate::domain::entities::transfer_result::FILE_NOT_FOUND;
    use crate::domain::entities::upload_item::UploadItem;
    use crate::domain::repositories::media_repository::{
        UploadError, UploadRequest, UploadedMedia,
    };

    /// `broken` を含むパスは読み込みに失敗し、`locked` を含むパスは存在確認に失敗し、
    /// `missing` を含むパスは存在しない
    struct MockSourceRepository;

    #[async_trait]
    impl SourceRepository for MockSourceRepository {
        async fn exists(&self, path: &Path) -> Result<bool> {
            if path.to_string_lossy().contains("locked") {
                anyhow::bail!("Permission denied (os error 13)");
            }
            Ok(!path.to_string_lossy().contains("missing"))
        }

        async fn size(&self, _path: &Path) -> Result<u64> {
            Ok(4)
        }

        async fn read(&self, path: &Path) -> Result<Vec<u8>> {
            if path.to_string_lossy().contains("broken") {
                anyhow::bail!("Input/output error");
            }
            Ok(b"data".to_vec())
        }
    }

    /// 呼び出し順を記録し、`reject` を含むファイル名はエラーにする
    struct RecordingMediaRepository {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingMediaRepository {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaRepository for RecordingMediaRepository {
        async fn upload(&self, request: &UploadRequest) -> Result<UploadedMedia, UploadError> {
            self.calls.lock().unwrap().push(request.file_name.clone());
            if request.file_name.contains("reject") {
                return Err(UploadError::new("File type not allowed").with_status(400));
            }
            Ok(UploadedMedia::new(format!(
                "https://cdn{}/{}",
                request.folder, request.file_name
            )))
        }
    }

    fn create_use_case(
        media: Arc<RecordingMediaRepository>,
    ) -> RunBatchUseCase<MockSourceRepository, RecordingMediaRepository> {
        let config = PipelineConfig::default().with_item_delay(Duration::ZERO);
        RunBatchUseCase::new(TransferItemUseCase::new(
            Arc::new(MockSourceRepository),
            media,
            config,
        ))
    }

    #[tokio::test]
    async fn test_run_batch_preserves_order() {
        let media = Arc::new(RecordingMediaRepository::new());
        let use_case = create_use_case(media.clone());

        let manifest = Manifest::new(vec![
            UploadItem::new("c.jpg", "c.jpg", "/images"),
            UploadItem::new("a.jpg", "a.jpg", "/images"),
            UploadItem::new("b.mp4", "b.mp4", "/videos"),
        ]);

        let report = use_case.execute(&manifest).await;

        assert_eq!(media.calls(), vec!["c.jpg", "a.jpg", "b.mp4"]);
        let names: Vec<&str> = report.results.iter().map(|r| r.item.file_name()).collect();
        assert_eq!(names, vec!["c.jpg", "a.jpg", "b.mp4"]);
        assert_eq!(report.results[2].url(), Some("https://cdn/videos/b.mp4"));
    }

    #[tokio::test]
    async fn test_run_batch_counts_mixed_outcomes() {
        let media = Arc::new(RecordingMediaRepository::new());
        let use_case = create_use_case(media.clone());

        let manifest = Manifest::new(vec![
            UploadItem::new("ok.jpg", "ok.jpg", "/images"),
            UploadItem::new("missing.jpg", "missing.jpg", "/images"),
            UploadItem::new("reject.exe", "reject.exe", "/images"),
            UploadItem::new("broken.mp4", "broken.mp4", "/videos"),
        ]);

        let report = use_case.execute(&manifest).await;

        assert_eq!(report.summary.success_count, 1);
        assert_eq!(report.summary.failed_count, 3);
        assert_eq!(report.summary.total(), manifest.len());
        assert_eq!(report.results.len(), manifest.len());
        assert_eq!(report.failures().count(), 3);

        // missing と broken はAPIを呼ばない
        assert_eq!(media.calls(), vec!["ok.jpg", "reject.exe"]);

        assert_eq!(report.results[2].reason(), Some("File type not allowed"));
        assert!(report.results[3]
            .reason()
            .unwrap()
            .contains("Input/output error"));
    }

    #[tokio::test]
    async fn test_run_batch_counts_stat_error_with_real_reason() {
        let media = Arc::new(RecordingMediaRepository::new());
        let use_case = create_use_case(media.clone());

        let manifest = Manifest::new(vec![
            UploadItem::new("locked/a.jpg", "a.jpg", "/images"),
            UploadItem::new("b.jpg", "b.jpg", "/images"),
        ]);

        let report = use_case.execute(&manifest).await;

        assert_eq!(report.summary.success_count, 1);
        assert_eq!(report.summary.failed_count, 1);
        let reason = report.results[0].reason().unwrap();
        assert!(reason.contains("Permission denied"));
        assert_ne!(reason, FILE_NOT_FOUND);
        assert_eq!(media.calls(), vec!["b.jpg"]);
    }

    #[tokio::test]
    async fn test_run_batch_empty_manifest() {
        let media = Arc::new(RecordingMediaRepository::new());
        let use_case = create_use_case(media.clone());

        let report = use_case.execute(&Manifest::default()).await;

        assert!(report.results.is_empty());
        assert_eq!(report.summary, BatchSummary::default());
        assert!(media.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_batch_applies_delay_between_items() {
        let media = Arc::new(RecordingMediaRepository::new());
        let config = PipelineConfig::default().with_item_delay(Duration::from_millis(20));
        let use_case = RunBatchUseCase::new(TransferItemUseCase::new(
            Arc::new(MockSourceRepository),
            media,
            config,
        ));

        let manifest = Manifest::new(vec![
            UploadItem::new("a.jpg", "a.jpg", "/images"),
            UploadItem::new("b.jpg", "b.jpg", "/images"),
            UploadItem::new("c.jpg", "c.jpg", "/images"),
        ]);

        let start = tokio::time::Instant::now();
        let report = use_case.execute(&manifest).await;

        // 3件なので待機は2回（最後のアイテムの後は待たない）
        assert_eq!(start.elapsed(), Duration::from_millis(40));
        assert_eq!(report.summary.success_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_batch_single_item_does_not_wait() {
        let media = Arc::new(RecordingMediaRepository::new());
        let config = PipelineConfig::default().with_item_delay(Duration::from_secs(5));
        let use_case = RunBatchUseCase::new(TransferItemUseCase::new(
            Arc::new(MockSourceRepository),
            media,
            config,
        ));

        let manifest = Manifest::new(vec![UploadItem::new("a.jpg", "a.jpg", "/images")]);

        let start = tokio::time::Instant::now();
        use_case.execute(&manifest).await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_run_batch_report_has_run_id() {
        let media = Arc::new(RecordingMediaRepository::new());
        let use_case = create_use_case(media);

        let manifest = Manifest::new(vec![UploadItem::new("a.jpg", "a.jpg", "/images")]);
        let first = use_case.execute(&manifest).await;
        let second = use_case.execute(&manifest).await;

        assert_ne!(first.run_id, second.run_id);
        assert!(first.finished_at >= first.started_at);
    }
}
