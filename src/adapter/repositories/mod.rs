//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod dry_run_media_repository;
pub mod imagekit_media_repository;
pub mod json_manifest_repository;
pub mod local_source_repository;
