//! # BatchSummary Value Object
//!
//! バッチ実行の成功数・失敗数

use super::transfer_result::{TransferOutcome, TransferResult};

/// バッチサマリー
///
/// 実行中に単調増加し、Batch Runnerのみが更新する
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub success_count: usize,
    pub failed_count: usize,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 転送結果を集計に加える
    pub fn record(&mut self, result: &TransferResult) {
        match result.outcome {
            TransferOutcome::Success { .. } => self.success_count += 1,
            TransferOutcome::Failure { .. } => self.failed_count += 1,
        }
    }

    /// 処理したアイテムの総数
    #[inline]
    pub fn total(&self) -> usize {
        self.success_count + self.failed_count
    }

    /// 全アイテムが成功したかチェックします。
    ///
    /// # 例
    ///
    /// ```
    /// use mediasync::domain::entities::batch_summary::BatchSummary;
    ///
    /// let all_ok = BatchSummary { success_count: 3, failed_count: 0 };
    /// assert!(all_ok.is_success());
    ///
    /// let partial = BatchSummary { success_count: 2, failed_count: 1 };
    /// assert!(!partial.is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        self.failed_count == 0
    }
}
