//! Mediasync - Media Uploader
//!
//! マニフェストのメディアファイルを ImageKit にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use mediasync::adapter::config::Config;
use mediasync::driver::{Args, MediaUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (missing credentials abort before any upload)
    let config = Config::load(&args.config)?;

    // Create workflow with injected configuration
    let workflow = MediaUploadWorkflow::new(config);

    // Per-item failures are reported in the summary and still exit 0
    workflow.execute(args).await?;

    Ok(())
}
