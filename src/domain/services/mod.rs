//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod retry_policy;
pub mod transfer_mode;
