//! Configuration module for the b2-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Merging CLI and environment overrides
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use validation::{parse_file_id, validate_config};
