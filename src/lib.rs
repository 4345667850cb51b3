//! B2 Downloader - a Backblaze B2 file fetcher
//!
//! This library provides functionality for downloading files from Backblaze B2
//! by file ID, using the two-step native API flow: authorize the account with
//! an application key, then request the file bytes against the API base URL
//! returned by the authorization call.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use b2_downloader::{download_by_id, B2Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::load(Path::new("config.toml"))?;
//!     config.options.file_id = Some("4_z27c88f1d182b150646ff0b16_f1004ba650fe24ce6_d20220723_m104352".to_string());
//!
//!     let client = B2Client::new(config.read_timeout())?;
//!     let report = download_by_id(&client, &config).await?;
//!     println!("wrote {} bytes", report.bytes_written);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;

// Re-exports for convenience
pub use api::{B2Client, B2Session, Credentials};
pub use config::Config;
pub use download::{download_by_id, DownloadReport};
pub use error::{Error, Result};
