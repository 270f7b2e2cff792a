//! Adapter Layer
//!
//! 外部システム（ImageKit, ファイルシステム, 設定）との統合

pub mod config;
pub mod imagekit;
pub mod repositories;
