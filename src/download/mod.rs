//! Download module for fetching file content.
//!
//! This module provides:
//! - Download-by-file-ID orchestration
//! - Streaming response bodies to disk

pub mod by_id;
pub mod stream;

pub use by_id::{download_by_id, DownloadReport};
pub use stream::write_to_file;
