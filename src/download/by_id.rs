//! Download-by-file-ID orchestration.

use std::path::PathBuf;

use crate::api::B2Client;
use crate::config::{parse_file_id, Config};
use crate::download::stream::write_to_file;
use crate::error::{Error, Result};
use crate::fs::resolve_output_path;
use crate::output::print_info;

/// Response header carrying the stored object's percent-encoded name.
const BZ_FILE_NAME_HEADER: &str = "X-Bz-File-Name";

/// Outcome of a completed download.
#[derive(Debug)]
pub struct DownloadReport {
    /// The file ID that was fetched, after any URL extraction.
    pub file_id: String,
    /// Where the body was written.
    pub output_path: PathBuf,
    /// Total bytes written to disk.
    pub bytes_written: u64,
}

/// Authorize, request the file by ID, and stream the body to disk.
///
/// Authorization always runs first; any authorization failure aborts
/// before a download request is issued.
pub async fn download_by_id(client: &B2Client, config: &Config) -> Result<DownloadReport> {
    let raw_id = config
        .options
        .file_id
        .as_ref()
        .ok_or_else(|| Error::MissingConfig("file_id".to_string()))?;
    let file_id = parse_file_id(raw_id)?;

    print_info("Authorizing with Backblaze B2...");
    let session = client.authorize_account(&config.credentials()).await?;

    if let Some(account_id) = &session.account_id {
        tracing::debug!("Authorized account {}", account_id);
    }
    tracing::debug!(
        "API base: {}, download base: {}",
        session.api_url,
        session.download_url
    );

    print_info(&format!("Downloading file ID: {}", file_id));
    let response = client.download_file_by_id(&session, &file_id).await?;

    let reported_name = response
        .headers()
        .get(BZ_FILE_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    if let Some(name) = &reported_name {
        tracing::debug!("Service reports file name {}", name);
    }

    let output_path = resolve_output_path(
        config.options.output_path.as_deref(),
        reported_name.as_deref(),
    );

    let bytes_written =
        write_to_file(response, &output_path, config.options.show_progress).await?;

    Ok(DownloadReport {
        file_id,
        output_path,
        bytes_written,
    })
}
