//! Filesystem module.
//!
//! Provides output file naming: decoding service-reported names and
//! resolving the final output path.

pub mod naming;

pub use naming::{decode_bz_file_name, resolve_output_path, sanitize_filename};
