use crate::env::GoEnvironment;
use crate::errors::GoenvError;
use once_cell::sync::Lazy;
use regex::Regex;
use starbase_styles::color;
use tracing::debug;

pub static VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+){0,2}((rc|beta)[0-9]+)?$").expect("Invalid version pattern.")
});

/// Strip a leading `go` or `v` prefix and validate the remaining version.
pub fn parse_version(value: &str) -> Result<String, GoenvError> {
    let trimmed = value.trim();
    let version = trimmed
        .strip_prefix("go")
        .or_else(|| trimmed.strip_prefix('v'))
        .unwrap_or(trimmed);

    if VERSION.is_match(version) {
        Ok(version.to_owned())
    } else {
        Err(GoenvError::InvalidVersion(value.to_owned()))
    }
}

/// Determines which Go version to install: an explicitly requested one,
/// or the latest stable release.
pub struct VersionResolver<'env> {
    client: &'env reqwest::Client,
    env: &'env GoEnvironment,
}

impl<'env> VersionResolver<'env> {
    pub fn new(env: &'env GoEnvironment, client: &'env reqwest::Client) -> Self {
        Self { client, env }
    }

    pub async fn resolve(&self, explicit: Option<&str>) -> Result<String, GoenvError> {
        let version = match explicit.map(|value| value.trim()) {
            Some(value) if !value.is_empty() && value != "latest" => parse_version(value)?,
            _ => self.fetch_latest_version().await?,
        };

        debug!("Resolved Go version {}", color::hash(&version));

        Ok(version)
    }

    /// Query the latest version endpoint. The first line of the body is
    /// the version with a `go` prefix, for example `go1.22.3`.
    pub async fn fetch_latest_version(&self) -> Result<String, GoenvError> {
        let url = &self.env.version_url;
        let unavailable = |reason: String| GoenvError::LatestVersionUnavailable {
            url: url.to_owned(),
            reason,
        };

        debug!("Loading latest Go version from {}", color::url(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| unavailable(error.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            return Err(unavailable(status.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|error| unavailable(error.to_string()))?;

        let Some(line) = body.lines().map(|line| line.trim()).find(|line| !line.is_empty()) else {
            return Err(unavailable("empty response".into()));
        };

        parse_version(line)
    }
}
