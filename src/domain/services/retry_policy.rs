//! # Retry Policy
//!
//! 一時的なアップロード失敗に対する再送ポリシー（指数バックオフ）

use std::time::Duration;

pub const INITIAL_RETRY_DELAY_MS: u64 = 1000;
pub const MAX_RETRY_DELAY_MS: u64 = 32000;

/// リトライポリシー
///
/// デフォルトは再送なし（`max_retries = 0`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RetryPolicy {
    /// 再送しないポリシー
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// 標準のバックオフ（1秒から開始、最大32秒）で `max_retries` 回まで再送する
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_delay: Duration::from_millis(INITIAL_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(MAX_RETRY_DELAY_MS),
        }
    }

    pub fn with_delays(mut self, initial_delay: Duration, max_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self.max_delay = max_delay;
        self
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// `retry_count` 回目の再送が許可されるか（1始まり）
    #[inline]
    pub fn allows(&self, retry_count: u32) -> bool {
        retry_count >= 1 && retry_count <= self.max_retries
    }

    /// `retry_count` 回目の再送までの待機時間
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        let exponent = retry_count.saturating_sub(1).min(31);
        let factor = 1u32 << exponent;
        std::cmp::min(self.initial_delay.saturating_mul(factor), self.max_delay)
    }
}
