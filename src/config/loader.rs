//! Configuration structures and loading logic.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::types::Credentials;
use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// B2 application key credentials.
#[derive(Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Key ID of the application key.
    #[serde(default)]
    pub key_id: String,

    /// The application key itself.
    #[serde(default)]
    pub application_key: String,
}

/// Keeps the application key out of logs and debug output.
impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("key_id", &self.key_id)
            .field("application_key", &"<redacted>")
            .finish()
    }
}

/// Download options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// File ID to download. The CLI positional argument overrides this.
    #[serde(default)]
    pub file_id: Option<String>,

    /// Output file path. Defaults to the file name the service reports.
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Whether to show a progress bar for large downloads.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Read timeout for HTTP requests, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            file_id: None,
            output_path: None,
            show_progress: true,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Credentials assembled from the account section.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.account.key_id.clone(),
            self.account.application_key.clone(),
        )
    }

    /// Read timeout as a `Duration`.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.options.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[account]
key_id = "0011aabbccddeeff0000000001"
application_key = "K001secret"

[options]
file_id = "4_zfileid"
output_path = "out.pdf"
show_progress = false
timeout_seconds = 60
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.key_id, "0011aabbccddeeff0000000001");
        assert_eq!(config.account.application_key, "K001secret");
        assert_eq!(config.options.file_id.as_deref(), Some("4_zfileid"));
        assert_eq!(
            config.options.output_path,
            Some(PathBuf::from("out.pdf"))
        );
        assert!(!config.options.show_progress);
        assert_eq!(config.read_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[account]
key_id = "id"
application_key = "key"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.options.file_id.is_none());
        assert!(config.options.output_path.is_none());
        assert!(config.options.show_progress);
        assert_eq!(config.options.timeout_seconds, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("config.example.toml"));
    }

    #[test]
    fn test_account_debug_redacts_key() {
        let account = AccountConfig {
            key_id: "keyid".to_string(),
            application_key: "topsecret".to_string(),
        };
        let debug = format!("{:?}", account);
        assert!(debug.contains("keyid"));
        assert!(!debug.contains("topsecret"));
    }
}
