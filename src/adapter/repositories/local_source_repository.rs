//! Local Source Repository Implementation
//!
//! SourceRepositoryのローカルファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::repositories::source_repository::SourceRepository;

/// ローカルファイルシステムのソースリポジトリ（読み取り専用）
#[derive(Debug, Default)]
pub struct LocalSourceRepository;

impl LocalSourceRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceRepository for LocalSourceRepository {
    async fn exists(&self, path: &Path) -> Result<bool> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to stat {}", path.display())),
        }
    }

    async fn size(&self, path: &Path) -> Result<u64> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        Ok(metadata.len())
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))
    }
}
