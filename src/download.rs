//! Statute dataset download — `GET /api/download/laws.json`, saved verbatim.

use std::path::Path;

pub const LAWS_PATH: &str = "/api/download/laws.json";
pub const DEFAULT_FILE_NAME: &str = "laws.json";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("download failed with status {status}")]
    Status { status: u16 },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },
}

/// Fetch the laws dataset and write the body to `output` unchanged.
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`DownloadError`] on request failure, a non-2xx status, or a write
/// failure. Nothing is written unless the response succeeded.
pub async fn download_laws(http: &reqwest::Client, base_url: &str, output: &Path) -> Result<usize, DownloadError> {
    let url = format!("{}{LAWS_PATH}", base_url.trim_end_matches('/'));
    tracing::debug!(%url, "downloading laws dataset");

    let response = http.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "laws download rejected");
        return Err(DownloadError::Status { status: status.as_u16() });
    }

    let body = response.bytes().await?;
    tokio::fs::write(output, &body)
        .await
        .map_err(|source| DownloadError::Write { path: output.display().to_string(), source })?;

    tracing::info!(bytes = body.len(), path = %output.display(), "laws dataset saved");
    Ok(body.len())
}

#[cfg(test)]
#[path = "download_test.rs"]
mod tests;
