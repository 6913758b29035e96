use crate::env::GoEnvironment;
use crate::errors::GoenvError;
use crate::platform::ToolchainRequest;
use crate::verifier::verify_checksum;
use futures::StreamExt;
use starbase_styles::color;
use starbase_utils::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Callback receiving `(downloaded bytes, total bytes)`. Total is 0 when
/// the server does not send a content length.
pub type OnChunkFn<'cb> = dyn Fn(u64, u64) + Send + Sync + 'cb;

pub fn create_http_client(env: &GoEnvironment) -> Result<reqwest::Client, GoenvError> {
    reqwest::Client::builder()
        .user_agent(concat!("goenv/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(30))
        .timeout(env.http_timeout)
        .build()
        .map_err(GoenvError::HttpClient)
}

/// Maps a toolchain request to a local archive, downloading it on a miss.
pub struct DistributionCache<'env> {
    client: &'env reqwest::Client,
    env: &'env GoEnvironment,
}

impl<'env> DistributionCache<'env> {
    pub fn new(env: &'env GoEnvironment, client: &'env reqwest::Client) -> Self {
        Self { client, env }
    }

    /// Return an absolute file path to the archive. This may not exist,
    /// as the path is composed ahead of time.
    pub fn get_download_path(&self, request: &ToolchainRequest) -> PathBuf {
        self.env.downloads_dir.join(request.get_archive_file())
    }

    pub fn get_download_url(&self, request: &ToolchainRequest) -> String {
        request.get_download_url(&self.env.download_host)
    }

    /// Return the archive for the request, downloading it if it does not
    /// exist locally. An existing file is trusted as-is.
    pub async fn fetch(
        &self,
        request: &ToolchainRequest,
        on_chunk: &OnChunkFn<'_>,
    ) -> Result<PathBuf, GoenvError> {
        let dest_file = self.get_download_path(request);

        if dest_file.exists() {
            info!("Using existing archive {}", color::path(&dest_file));

            return Ok(dest_file);
        }

        let url = self.get_download_url(request);

        info!("Downloading {}", color::url(&url));

        let part_file = dest_file.with_file_name(format!("{}.part", request.get_archive_file()));

        if let Err(error) = self.download(&url, &part_file, &dest_file, on_chunk).await {
            let _ = fs::remove_file(&part_file);

            return Err(error);
        }

        debug!("Successfully downloaded archive");

        Ok(dest_file)
    }

    async fn download(
        &self,
        url: &str,
        part_file: &Path,
        dest_file: &Path,
        on_chunk: &OnChunkFn<'_>,
    ) -> Result<(), GoenvError> {
        download_from_url(self.client, url, part_file, on_chunk).await?;

        if self.env.verify_checksums {
            verify_checksum(self.client, url, part_file).await?;
        } else {
            debug!("Checksum verification disabled, skipping");
        }

        // Only complete (and verified) archives appear at the cached path
        fs::rename(part_file, dest_file)?;

        Ok(())
    }
}

/// Stream the body of a URL into a file, reporting progress per chunk.
#[tracing::instrument(skip(client, on_chunk))]
pub async fn download_from_url(
    client: &reqwest::Client,
    url: &str,
    dest_file: &Path,
    on_chunk: &OnChunkFn<'_>,
) -> Result<(), GoenvError> {
    let handle_http_error = |error: reqwest::Error| GoenvError::Http {
        url: url.to_owned(),
        error,
    };

    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let response = client.get(url).send().await.map_err(handle_http_error)?;
    let status = response.status();

    if status.as_u16() == 404 {
        return Err(GoenvError::DownloadNotFound(url.to_owned()));
    }

    if !status.is_success() {
        return Err(GoenvError::DownloadFailed {
            url: url.to_owned(),
            status: status.to_string(),
        });
    }

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;
    let mut file = fs::create_file(dest_file)?;
    let mut stream = response.bytes_stream();

    on_chunk(0, total);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(handle_http_error)?;

        file.write_all(&chunk)
            .map_err(|error| GoenvError::DownloadFailed {
                url: url.to_owned(),
                status: format!("unable to write {}: {error}", dest_file.display()),
            })?;

        downloaded += chunk.len() as u64;
        on_chunk(downloaded, total);
    }

    file.flush().map_err(|error| GoenvError::DownloadFailed {
        url: url.to_owned(),
        status: format!("unable to write {}: {error}", dest_file.display()),
    })?;

    Ok(())
}
