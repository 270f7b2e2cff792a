//! # Manifest Repository Trait
//!
//! マニフェストの取得元を抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::manifest::Manifest;

/// マニフェストリポジトリ
///
/// プロセス起動時に一度だけ呼ばれる
#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// マニフェストを読み込む
    ///
    /// # Errors
    ///
    /// 読み込みまたは検証に失敗した場合にエラーを返す（起動時の致命的エラー）
    async fn load(&self) -> Result<Manifest>;
}
