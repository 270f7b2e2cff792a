//! ImageKit Adapter Modules
//!
//! ImageKit Upload API 統合のためのアダプターモジュール

pub mod client;
pub mod models;
pub mod retry;
