//! # UploadItem Entity
//!
//! マニフェストの1エントリ（ローカルファイルとアップロード先の組）

use std::path::{Path, PathBuf};

/// アップロード対象アイテム
///
/// 同一性は `local_path` で判定する
#[derive(Debug, Clone, Eq)]
pub struct UploadItem {
    local_path: PathBuf,
    file_name: String,
    folder: String,
}

impl UploadItem {
    /// 新しいアイテムを作成
    ///
    /// # Arguments
    ///
    /// * `local_path` - ローカルファイルのパス（ベースディレクトリからの相対パスも可）
    /// * `file_name` - アップロード先のファイル名
    /// * `folder` - アップロード先の論理フォルダ（例: `/videos`）
    pub fn new(
        local_path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            local_path: local_path.into(),
            file_name: file_name.into(),
            folder: folder.into(),
        }
    }

    #[inline]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// アップロード先のリモートパス（`{folder}/{file_name}`）
    pub fn remote_path(&self) -> String {
        let folder = self.folder.trim_end_matches('/');
        format!("{}/{}", folder, self.file_name)
    }
}

impl PartialEq for UploadItem {
    fn eq(&self, other: &Self) -> bool {
        self.local_path == other.local_path
    }
}

impl std::hash::Hash for UploadItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.local_path.hash(state);
    }
}
