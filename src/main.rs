//! B2 Downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use b2_downloader::{
    api::B2Client,
    cli::Args,
    config::{parse_file_id, validate_config, Config},
    download::download_by_id,
    error::{exit_codes, Error, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Authentication(_) | Error::Api(_) => {
                    ExitCode::from(exit_codes::AUTH_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                Error::Io(_) => ExitCode::from(exit_codes::IO_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    // Resolve a URL-form file id to the bare identifier
    let file_id = parse_file_id(config.options.file_id.as_deref().unwrap_or_default())?;
    config.options.file_id = Some(file_id.clone());

    // Print configuration summary
    let output = config
        .options
        .output_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "name reported by the service".to_string());
    print_config_summary(&file_id, &output);

    // Initialize API client
    let client = B2Client::new(config.read_timeout())?;

    // Run the download
    let report = download_by_id(&client, &config).await?;

    print_success(&format!(
        "Download complete: wrote {} bytes to {}",
        report.bytes_written,
        report.output_path.display()
    ));

    Ok(())
}
