//! Streaming response-to-disk writer.

use std::path::Path;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Minimum advertised size to show a progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Stream a response body to a file, returning the total bytes written.
///
/// The body is consumed chunk by chunk, so peak memory stays independent of
/// the object size. The destination is created (truncating any previous
/// content) only after the caller has verified the HTTP status. On a
/// mid-stream or write failure the partial file is deleted best-effort and
/// the original error is returned.
pub async fn write_to_file(
    response: Response,
    output_path: &Path,
    show_progress: bool,
) -> Result<u64> {
    let content_length = response.content_length();
    let progress = if show_progress
        && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false)
    {
        Some(create_download_bar(content_length.unwrap_or(0)))
    } else {
        None
    };

    let file = File::create(output_path).await?;

    let result = copy_body(response, file, progress.as_ref()).await;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    match result {
        Ok(written) => Ok(written),
        Err(e) => {
            remove_partial(output_path).await;
            Err(e)
        }
    }
}

/// Copy the body stream into the file, counting bytes.
///
/// Takes the file by value so the handle is closed on every exit path
/// before the caller considers deleting it.
async fn copy_body(
    response: Response,
    mut file: File,
    progress: Option<&ProgressBar>,
) -> Result<u64> {
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            Error::Download(format!("Stream interrupted after {} bytes: {}", written, e))
        })?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(written);
        }
    }

    file.flush().await?;

    Ok(written)
}

/// Best-effort deletion of an incomplete output file.
async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed partial file {}", path.display()),
        Err(e) => tracing::warn!(
            "Could not remove partial file {}: {}",
            path.display(),
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Start a mock server and fetch a response whose body is `body`.
    ///
    /// The server is returned so it outlives the streaming read.
    async fn body_response(body: Vec<u8>) -> (MockServer, Response) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/file"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;

        let response = reqwest::get(format!("{}/file", server.uri()))
            .await
            .unwrap();
        (server, response)
    }

    #[tokio::test]
    async fn writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bin");
        let (_server, response) = body_response(b"hello world".to_vec()).await;

        let written = write_to_file(response, &output, false).await.unwrap();

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&output).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn zero_byte_body_yields_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.bin");
        let (_server, response) = body_response(Vec::new()).await;

        let written = write_to_file(response, &output, false).await.unwrap();

        assert_eq!(written, 0);
        assert!(output.exists());
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bin");
        std::fs::write(&output, "a much longer previous file content").unwrap();

        let (_server, response) = body_response(b"short".to_vec()).await;
        let written = write_to_file(response, &output, false).await.unwrap();

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(&output).unwrap(), b"short");
    }

    #[tokio::test]
    async fn binary_body_survives_chunking() {
        let body: Vec<u8> = (0..64 * 1024u32).map(|i| (i % 256) as u8).collect();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("pattern.bin");

        let (_server, response) = body_response(body.clone()).await;
        let written = write_to_file(response, &output, false).await.unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&output).unwrap(), body);
    }

    #[tokio::test]
    async fn unwritable_destination_fails() {
        let (_server, response) = body_response(b"data".to_vec()).await;
        let output = Path::new("/nonexistent-dir/out.bin");

        let err = write_to_file(response, output, false).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!output.exists());
    }

    /// Serve one request whose Content-Length promises more bytes than are
    /// sent, then drop the connection mid-body.
    async fn start_truncating_server(body_prefix: &'static [u8], advertised_len: usize) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0; 4096];
                let _ = socket.read(&mut buf).await;

                let header = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n",
                    advertised_len
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(body_prefix).await;
                let _ = socket.flush().await;
            }
        });

        format!("http://{}/file", addr)
    }

    #[tokio::test]
    async fn interrupted_stream_removes_partial_file() {
        let url = start_truncating_server(b"first chunk.", 64).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("partial.bin");

        let response = reqwest::get(url).await.unwrap();
        let err = write_to_file(response, &output, false).await.unwrap_err();

        assert!(matches!(err, Error::Download(_)));
        assert!(!output.exists());
    }
}
