use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum GoenvError {
    #[diagnostic(
        code(goenv::verify::checksum_mismatch),
        help = "The download may have been corrupted or tampered with. Try again, or pass --no-verify to skip verification."
    )]
    #[error(
        "Checksum has failed for {}. Expected {}, but calculated {}.",
        .url.style(Style::Url),
        .expected.style(Style::Hash),
        .actual.style(Style::Hash),
    )]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[diagnostic(code(goenv::download::failed))]
    #[error("Failed to download Go from {}: {status}", .url.style(Style::Url))]
    DownloadFailed { url: String, status: String },

    #[diagnostic(
        code(goenv::download::missing),
        help = "Check that the version exists at https://go.dev/dl/"
    )]
    #[error(
        "Go download {} does not exist. This version may not be published for your operating system or architecture.",
        .0.style(Style::Url)
    )]
    DownloadNotFound(String),

    #[diagnostic(code(goenv::unpack::failed))]
    #[error(
        "Failed to extract {} into {}. The archive may be truncated or corrupt; delete it and try again.",
        .archive.style(Style::Path),
        .dir.style(Style::Path),
    )]
    ExtractFailed {
        archive: PathBuf,
        dir: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[diagnostic(code(goenv::http))]
    #[error("Request to {} failed.", .url.style(Style::Url))]
    Http {
        url: String,
        #[source]
        error: reqwest::Error,
    },

    #[diagnostic(code(goenv::http::client))]
    #[error("Failed to create an HTTP client.")]
    HttpClient(#[source] reqwest::Error),

    #[diagnostic(code(goenv::unpack::missing_download))]
    #[error("Unable to extract Go, archive {} is missing.", .0.style(Style::Path))]
    InstallMissingDownload(PathBuf),

    #[diagnostic(code(goenv::activate::invalid_gopath))]
    #[error("Unable to build GOPATH, {} contains a path separator.", .0.style(Style::Path))]
    InvalidGopath(PathBuf),

    #[diagnostic(
        code(goenv::version::invalid),
        help = "Versions look like 1.20, 1.21.5, or 1.22rc1."
    )]
    #[error("Invalid Go version {}.", .0.style(Style::Hash))]
    InvalidVersion(String),

    #[diagnostic(code(goenv::version::latest_unavailable))]
    #[error("Unable to determine the latest Go version from {}: {reason}", .url.style(Style::Url))]
    LatestVersionUnavailable { url: String, reason: String },

    #[diagnostic(code(goenv::env::permission))]
    #[error("Unable to create directory {}.", .path.style(Style::Path))]
    PermissionDenied {
        path: PathBuf,
        #[source]
        error: Box<starbase_utils::fs::FsError>,
    },

    #[diagnostic(code(goenv::activate::template))]
    #[error("Failed to render activation script {}.", .path.style(Style::Path))]
    Template {
        path: PathBuf,
        #[source]
        error: tera::Error,
    },

    #[diagnostic(code(goenv::unsupported::arch))]
    #[error("Unable to install Go, unsupported architecture {}.", .0.style(Style::Symbol))]
    UnsupportedArchitecture(String),

    #[diagnostic(
        code(goenv::unsupported::platform),
        severity(Warning),
        help = "Supported platforms are Linux, macOS, and FreeBSD."
    )]
    #[error("Your platform {} is not supported, sorry!", .0.style(Style::Symbol))]
    UnsupportedPlatform(String),

    #[diagnostic(transparent)]
    #[error(transparent)]
    Fs(#[from] starbase_utils::fs::FsError),
}
