//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::dry_run_media_repository::DryRunMediaRepository;
use crate::adapter::repositories::imagekit_media_repository::ImageKitMediaRepository;
use crate::adapter::repositories::json_manifest_repository::{
    BuiltinManifestRepository, JsonManifestRepository,
};
use crate::adapter::repositories::local_source_repository::LocalSourceRepository;
use crate::application::dto::pipeline_config::PipelineConfig;
use crate::application::use_cases::run_batch::{BatchReport, RunBatchUseCase};
use crate::application::use_cases::transfer_item::TransferItemUseCase;
use crate::domain::entities::manifest::Manifest;
use crate::domain::entities::transfer_result::TransferOutcome;
use crate::domain::repositories::manifest_repository::ManifestRepository;
use crate::domain::repositories::media_repository::MediaRepository;
use crate::domain::repositories::source_repository::SourceRepository;

use super::cli::Args;

/// CLI引数で設定を上書きする
pub fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(base_dir) = &args.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(delay_ms) = args.delay_ms {
        config.item_delay_ms = delay_ms;
    }
    if let Some(max_retries) = args.max_retries {
        config.max_retries = max_retries;
    }
    config
}

/// Media Upload Workflow
pub struct MediaUploadWorkflow {
    config: Config,
}

impl MediaUploadWorkflow {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the upload workflow
    ///
    /// アイテム単位の失敗は `BatchReport` に含まれ、エラーにはならない
    pub async fn execute(&self, args: Args) -> Result<BatchReport> {
        info!("Starting ImageKit uploader...");
        info!("Dry run: {}", args.dry_run);

        let config = apply_overrides(self.config.clone(), &args);

        println!("✓ Using configuration:");
        println!("  Public key: {}", config.masked_public_key());
        println!("  URL endpoint: {}", config.url_endpoint);
        println!("  Base directory: {}", config.base_dir_path().display());
        println!(
            "  Threshold: {} bytes, delay: {}ms, retries: {}",
            config.size_threshold_bytes, config.item_delay_ms, config.max_retries
        );

        let manifest = load_manifest(&args).await?;
        println!("✓ Loaded manifest: {} items", manifest.len());

        let pipeline = config.to_pipeline_config();
        let source = Arc::new(LocalSourceRepository::new());

        let report = if args.dry_run {
            println!("✓ Dry-run mode (not actually uploading)");
            let media = Arc::new(DryRunMediaRepository::new(config.url_endpoint.clone()));
            run_pipeline(source, media, pipeline, &manifest).await
        } else {
            let media = Arc::new(ImageKitMediaRepository::new(&config)?);
            println!("✓ Created ImageKit client ({})", config.upload_endpoint);
            run_pipeline(source, media, pipeline, &manifest).await
        };

        print_summary(&report);

        Ok(report)
    }
}

async fn load_manifest(args: &Args) -> Result<Manifest> {
    match &args.manifest {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            JsonManifestRepository::new(expanded).load().await
        }
        None => BuiltinManifestRepository::new().load().await,
    }
}

async fn run_pipeline<S: SourceRepository, M: MediaRepository>(
    source: Arc<S>,
    media: Arc<M>,
    pipeline: PipelineConfig,
    manifest: &Manifest,
) -> BatchReport {
    let transfer_use_case = TransferItemUseCase::new(source, media, pipeline);
    RunBatchUseCase::new(transfer_use_case)
        .execute(manifest)
        .await
}

/// 実行結果のサマリーを表示
pub fn print_summary(report: &BatchReport) {
    println!();
    println!("Upload summary (run {}):", report.run_id);
    for result in &report.results {
        match &result.outcome {
            TransferOutcome::Success { url } => {
                println!("  ✓ {} → {}", result.item.file_name(), url)
            }
            TransferOutcome::Failure { reason } => {
                println!("  ✗ {}: {}", result.item.file_name(), reason)
            }
        }
    }
    println!(
        "✓ Uploaded {} files ({} failed) in {}s",
        report.summary.success_count,
        report.summary.failed_count,
        report.elapsed().num_seconds()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_apply_overrides() {
        let args = Args::parse_from([
            "mediasync",
            "--base-dir",
            "/srv/site",
            "--delay-ms",
            "0",
            "--max-retries",
            "2",
        ]);

        let config = apply_overrides(Config::default(), &args);

        assert_eq!(config.base_dir, "/srv/site");
        assert_eq!(config.item_delay_ms, 0);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_apply_overrides_keeps_config_values() {
        let args = Args::parse_from(["mediasync"]);
        let config = Config {
            base_dir: "/from/config".to_string(),
            item_delay_ms: 500,
            max_retries: 1,
            ..Config::default()
        };

        let config = apply_overrides(config, &args);

        assert_eq!(config.base_dir, "/from/config");
        assert_eq!(config.item_delay_ms, 500);
        assert_eq!(config.max_retries, 1);
    }

    #[tokio::test]
    async fn test_load_builtin_manifest_by_default() {
        let args = Args::parse_from(["mediasync"]);
        let manifest = load_manifest(&args).await.unwrap();
        assert_eq!(manifest.len(), BuiltinManifestRepository::manifest().len());
    }
}
