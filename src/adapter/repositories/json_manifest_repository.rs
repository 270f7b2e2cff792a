//! Manifest Repository Implementations
//!
//! 組み込みマニフェストとJSONファイルのマニフェスト

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::domain::entities::manifest::Manifest;
use crate::domain::entities::upload_item::UploadItem;
use crate::domain::repositories::manifest_repository::ManifestRepository;

/// サイトで公開する組み込みアセット `(local_path, file_name, folder)`
pub const BUILTIN_ENTRIES: &[(&str, &str, &str)] = &[
    ("public/videos/hero-background.mp4", "hero-background.mp4", "/videos"),
    ("public/videos/worship-highlights.mp4", "worship-highlights.mp4", "/videos"),
    ("public/videos/cam1.mp4", "cam1.mp4", "/videos"),
    ("public/images/sanctuary.jpg", "sanctuary.jpg", "/images"),
    ("public/images/community-outreach.jpg", "community-outreach.jpg", "/images"),
    ("public/images/youth-ministry.jpg", "youth-ministry.jpg", "/images"),
    ("public/images/church-logo.png", "church-logo.png", "/images"),
];

/// 組み込みマニフェストリポジトリ
#[derive(Debug, Default)]
pub struct BuiltinManifestRepository;

impl BuiltinManifestRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn manifest() -> Manifest {
        BUILTIN_ENTRIES
            .iter()
            .map(|(local_path, file_name, folder)| UploadItem::new(*local_path, *file_name, *folder))
            .collect::<Vec<_>>()
            .into()
    }
}

#[async_trait]
impl ManifestRepository for BuiltinManifestRepository {
    async fn load(&self) -> Result<Manifest> {
        Ok(Self::manifest())
    }
}

/// マニフェストエントリ（JSON永続化用の内部表現）
#[derive(Debug, Deserialize, Serialize)]
struct ManifestEntryJson {
    local_path: PathBuf,
    file_name: String,
    folder: String,
}

/// JSONファイルベースのマニフェストリポジトリ
pub struct JsonManifestRepository {
    path: PathBuf,
}

impl JsonManifestRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_sync(&self) -> Result<Manifest> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest {}", self.path.display()))?;

        let entries: Vec<ManifestEntryJson> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", self.path.display()))?;

        let items = entries
            .into_iter()
            .map(|e| UploadItem::new(e.local_path, e.file_name, e.folder))
            .collect();

        let manifest = Manifest::validated(items)
            .with_context(|| format!("Invalid manifest {}", self.path.display()))?;

        info!(
            "Loaded manifest {} with {} items",
            self.path.display(),
            manifest.len()
        );

        Ok(manifest)
    }
}

#[async_trait]
impl ManifestRepository for JsonManifestRepository {
    async fn load(&self) -> Result<Manifest> {
        self.load_sync()
    }
}
