//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// ローカルのメディアファイルをImageKitにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "mediasync")]
#[command(about = "Upload the site's media manifest to ImageKit", long_about = None)]
pub struct Args {
    /// Dry run mode - read and encode files but don't upload
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path
    #[arg(short, long, default_value = "./mediasync.json")]
    pub config: String,

    /// Manifest JSON file (built-in manifest when omitted)
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Base directory for relative manifest paths
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Delay between items in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Retry transient upload failures up to N times (0 disables)
    #[arg(long)]
    pub max_retries: Option<u32>,
}
