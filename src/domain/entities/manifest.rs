//! # Manifest Value Object
//!
//! アップロード対象アイテムの順序付きリスト

use thiserror::Error;

use super::upload_item::UploadItem;

/// マニフェストの検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("manifest is empty")]
    Empty,

    #[error("entry {index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error("entry {index}: folder '{folder}' must start with '/'")]
    RelativeFolder { index: usize, folder: String },
}

/// マニフェスト
///
/// 起動時に一度だけ構築され、実行中は変更されない
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    items: Vec<UploadItem>,
}

impl Manifest {
    /// 新しいマニフェストを作成（宣言順を保持）
    pub fn new(items: Vec<UploadItem>) -> Self {
        Self { items }
    }

    /// エントリを検証してマニフェストを作成
    ///
    /// 外部ファイルから読み込んだエントリに使用する
    ///
    /// # Errors
    ///
    /// 空のマニフェスト、空のフィールド、`/` で始まらないフォルダの場合にエラーを返す
    pub fn validated(items: Vec<UploadItem>) -> Result<Self, ManifestError> {
        if items.is_empty() {
            return Err(ManifestError::Empty);
        }

        for (index, item) in items.iter().enumerate() {
            if item.local_path().as_os_str().is_empty() {
                return Err(ManifestError::EmptyField {
                    index,
                    field: "local_path",
                });
            }
            if item.file_name().trim().is_empty() {
                return Err(ManifestError::EmptyField {
                    index,
                    field: "file_name",
                });
            }
            if item.folder().trim().is_empty() {
                return Err(ManifestError::EmptyField {
                    index,
                    field: "folder",
                });
            }
            if !item.folder().starts_with('/') {
                return Err(ManifestError::RelativeFolder {
                    index,
                    folder: item.folder().to_string(),
                });
            }
        }

        Ok(Self { items })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UploadItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a UploadItem;
    type IntoIter = std::slice::Iter<'a, UploadItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<UploadItem>> for Manifest {
    fn from(items: Vec<UploadItem>) -> Self {
        Self::new(items)
    }
}
