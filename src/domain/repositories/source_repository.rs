//! # Source Repository Trait
//!
//! ローカルのアップロード元ファイルへの読み取り専用アクセスを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// ソースリポジトリ
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// 通常ファイルとして存在するかどうか
    ///
    /// 存在しない場合は `Ok(false)`。権限不足など存在を判定できない場合はエラーを返す
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// ファイルのバイト数を返す
    async fn size(&self, path: &Path) -> Result<u64>;

    /// ファイルの内容を読み込む
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
}
