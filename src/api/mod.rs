//! Backblaze B2 API module.
//!
//! This module provides:
//! - HTTP client for the B2 native REST API
//! - Credential encoding for the authorization handshake
//! - API request and response types

pub mod auth;
pub mod client;
pub mod types;

pub use client::B2Client;
pub use types::*;
