//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **UploadItem**: マニフェストの1エントリ
//! - **Manifest**: 順序付きのアップロード対象リスト
//! - **TransferResult**: アイテムごとの転送結果
//! - **BatchSummary**: 成功数・失敗数の集計

pub mod batch_summary;
pub mod manifest;
pub mod transfer_result;
pub mod upload_item;
