use crate::errors::GoenvError;
use sha2::{Digest, Sha256};
use starbase_styles::color;
use starbase_utils::fs::{self, FsError};
use std::io;
use std::path::Path;
use tracing::{debug, trace, warn};

pub fn get_checksum_url(download_url: &str) -> String {
    format!("{download_url}.sha256")
}

pub fn get_sha256_hash_of_file(path: &Path) -> Result<String, GoenvError> {
    trace!("Calculating SHA256 checksum for file {}", color::path(path));

    let mut file = fs::open_file(path)?;
    let mut sha = Sha256::new();

    io::copy(&mut file, &mut sha).map_err(|error| FsError::Read {
        path: path.to_path_buf(),
        error: Box::new(error),
    })?;

    let hash = format!("{:x}", sha.finalize());

    trace!("Calculated hash {}", color::hash(&hash));

    Ok(hash)
}

/// Verify a downloaded archive against the `.sha256` file published next
/// to it. Archives without a published checksum are accepted with a warning.
pub async fn verify_checksum(
    client: &reqwest::Client,
    download_url: &str,
    download_file: &Path,
) -> Result<bool, GoenvError> {
    let url = get_checksum_url(download_url);
    let handle_http_error = |error: reqwest::Error| GoenvError::Http {
        url: url.clone(),
        error,
    };

    debug!("Attempting to download checksum from {}", color::url(&url));

    let response = client.get(&url).send().await.map_err(handle_http_error)?;
    let status = response.status();

    if status.as_u16() == 404 || status.as_u16() == 403 {
        warn!(
            "No checksum published at {}, unable to verify the download",
            color::url(&url)
        );

        return Ok(false);
    }

    if !status.is_success() {
        return Err(GoenvError::DownloadFailed {
            url: url.clone(),
            status: status.to_string(),
        });
    }

    let body = response.text().await.map_err(handle_http_error)?;
    let expected = body
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    let actual = get_sha256_hash_of_file(download_file)?;

    if expected != actual {
        return Err(GoenvError::ChecksumMismatch {
            url: download_url.to_owned(),
            expected,
            actual,
        });
    }

    debug!("Successfully verified, checksum matches");

    Ok(true)
}
