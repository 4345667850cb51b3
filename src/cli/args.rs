//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Backblaze B2 file downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "b2-downloader",
    version,
    about = "Download files from Backblaze B2 by file ID",
    long_about = "A CLI tool to fetch files from Backblaze B2.\n\n\
                  Authorizes the account with an application key, then downloads a single \
                  file by its file ID and streams it to a local file."
)]
pub struct Args {
    /// B2 file ID, or a download URL containing a fileId query parameter.
    #[arg(value_name = "FILE_ID")]
    pub file_id: Option<String>,

    /// Output file path. Defaults to the name reported by the service.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// B2 application key ID.
    #[arg(long = "key-id", env = "B2_KEY_ID")]
    pub key_id: Option<String>,

    /// B2 application key.
    #[arg(long = "application-key", env = "B2_APPLICATION_KEY", hide_env_values = true)]
    pub application_key: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Read timeout in seconds for API and download requests.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Hide the download progress bar.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Override account settings if provided
        if let Some(key_id) = self.key_id {
            config.account.key_id = key_id;
        }

        if let Some(application_key) = self.application_key {
            config.account.application_key = application_key;
        }

        // Override options if provided
        if let Some(file_id) = self.file_id {
            config.options.file_id = Some(file_id);
        }

        if let Some(output) = self.output {
            config.options.output_path = Some(output);
        }

        if let Some(timeout) = self.timeout {
            config.options.timeout_seconds = timeout;
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
