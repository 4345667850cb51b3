//! Configuration validation logic.

use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the merged configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_key_id(&config.account.key_id)?;
    validate_application_key(&config.account.application_key)?;
    validate_file_id_present(config.options.file_id.as_deref())?;

    Ok(())
}

/// Validate the key ID.
pub fn validate_key_id(key_id: &str) -> Result<()> {
    if key_id.is_empty() {
        return Err(Error::MissingConfig(
            "key_id (set [account] key_id, --key-id, or B2_KEY_ID)".to_string(),
        ));
    }

    if is_placeholder(key_id) {
        return Err(Error::ConfigValidation {
            field: "key_id".to_string(),
            message: "Key ID appears to be a placeholder. Please provide your actual B2 key ID."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the application key.
pub fn validate_application_key(application_key: &str) -> Result<()> {
    if application_key.is_empty() {
        return Err(Error::MissingConfig(
            "application_key (set [account] application_key, --application-key, or B2_APPLICATION_KEY)"
                .to_string(),
        ));
    }

    if is_placeholder(application_key) {
        return Err(Error::ConfigValidation {
            field: "application_key".to_string(),
            message:
                "Application key appears to be a placeholder. Please provide your actual B2 application key."
                    .to_string(),
        });
    }

    Ok(())
}

fn validate_file_id_present(file_id: Option<&str>) -> Result<()> {
    match file_id {
        Some(id) if !id.trim().is_empty() => Ok(()),
        _ => Err(Error::MissingConfig(
            "file_id (pass FILE_ID on the command line or set [options] file_id)".to_string(),
        )),
    }
}

fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.contains("replaceme") || lower.contains("your_key")
}

/// Extract a file ID from a direct ID string or a B2 download URL.
///
/// URLs are recognized by scheme and must carry a `fileId` query parameter,
/// the form B2 uses for shareable download links. Anything else passes
/// through as an opaque file ID; the service is the authority on its format.
pub fn parse_file_id(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::ConfigValidation {
            field: "file_id".to_string(),
            message: "File ID cannot be empty".to_string(),
        });
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input)?;

        if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "fileId") {
            if !value.is_empty() {
                return Ok(value.into_owned());
            }
        }

        return Err(Error::ConfigValidation {
            field: "file_id".to_string(),
            message: format!("No fileId parameter found in URL: {}", input),
        });
    }

    Ok(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{AccountConfig, OptionsConfig};

    fn valid_config() -> Config {
        Config {
            account: AccountConfig {
                key_id: "0011aabbccddeeff0000000001".to_string(),
                application_key: "K001YVrvKFo5jJXpwU8LNzvUT".to_string(),
            },
            options: OptionsConfig {
                file_id: Some("4_zsomefileid".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_key_id() {
        let mut config = valid_config();
        config.account.key_id = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_empty_application_key() {
        let mut config = valid_config();
        config.account.application_key = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_placeholder_credentials() {
        let mut config = valid_config();
        config.account.key_id = "REPLACEME".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));

        let mut config = valid_config();
        config.account.application_key = "your_key_here".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_missing_file_id() {
        let mut config = valid_config();
        config.options.file_id = None;
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));

        let mut config = valid_config();
        config.options.file_id = Some("   ".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_file_id_direct() {
        assert_eq!(
            parse_file_id("4_z64a715e19e4932e197750a19_f107fa1062142071e").unwrap(),
            "4_z64a715e19e4932e197750a19_f107fa1062142071e"
        );
        // Opaque IDs pass through untouched, whatever their shape.
        assert_eq!(parse_file_id("abc123").unwrap(), "abc123");
        assert_eq!(parse_file_id("  abc123  ").unwrap(), "abc123");
    }

    #[test]
    fn test_parse_file_id_from_url() {
        let url = "https://f003.backblazeb2.com/b2api/v2/b2_download_file_by_id?fileId=4_zabc_f123";
        assert_eq!(parse_file_id(url).unwrap(), "4_zabc_f123");
    }

    #[test]
    fn test_parse_file_id_idempotent() {
        // The entry point resolves the id once for the config summary and
        // the download path resolves it again; the result must be stable.
        let url = "https://f003.backblazeb2.com/b2api/v2/b2_download_file_by_id?fileId=4_zabc_f123";
        let once = parse_file_id(url).unwrap();
        assert_eq!(parse_file_id(&once).unwrap(), once);
    }

    #[test]
    fn test_parse_file_id_url_without_parameter() {
        assert!(parse_file_id("https://example.com/download").is_err());
        assert!(parse_file_id("https://example.com/download?fileId=").is_err());
    }

    #[test]
    fn test_parse_file_id_empty() {
        assert!(parse_file_id("").is_err());
        assert!(parse_file_id("   ").is_err());
    }
}
