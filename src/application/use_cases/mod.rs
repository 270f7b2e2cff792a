//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **TransferItemUseCase**: 1アイテムの転送（モード選択とアップロード）
//! - **RunBatchUseCase**: マニフェスト全体の逐次実行と集計

pub mod run_batch;
pub mod transfer_item;
