//! # Transfer Mode Selection
//!
//! ファイルサイズから転送モードを決定する
//!
//! base64エンコードはペイロードを約33%膨らませるため、
//! 閾値を超えるファイルはバイナリのまま送信する。

use crate::domain::entities::transfer_result::TransferMode;

/// デフォルトのサイズ閾値（50MB）
pub const DEFAULT_SIZE_THRESHOLD: u64 = 50 * 1024 * 1024;

/// サイズが閾値を**超える**場合はバイナリ、閾値以下ならbase64
pub fn select_transfer_mode(size: u64, threshold: u64) -> TransferMode {
    if size > threshold {
        TransferMode::Binary
    } else {
        TransferMode::Encoded
    }
}

/// base64エンコード後のバイト数（パディング込み）
pub fn encoded_len(size: u64) -> u64 {
    size.div_ceil(3) * 4
}
