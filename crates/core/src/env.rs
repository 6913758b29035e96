use crate::errors::GoenvError;
use crate::helpers::{get_env_duration, get_env_var, is_env_enabled};
use starbase_utils::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_DIR_NAME: &str = ".config-home";
pub const DEFAULT_DOWNLOAD_HOST: &str = "https://storage.googleapis.com";
pub const DEFAULT_VERSION_URL: &str = "https://go.dev/VERSION?m=text";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(600);

/// All paths and settings for a single goenv run, derived once from the
/// environment's base directory and passed to every component.
#[derive(Clone, Debug)]
pub struct GoEnvironment {
    /// Root of the isolated environment (the `<basedir>` argument).
    pub root: PathBuf,

    /// Activation scripts and compiled binaries (GOBIN).
    pub bin_dir: PathBuf, // <root>/bin

    /// Holds downloads, distributions, and the build cache.
    pub config_dir: PathBuf, // <root>/.config-home

    /// Build cache exported as GOCACHE.
    pub cache_dir: PathBuf, // <root>/.config-home/cache

    /// Extracted distributions, one directory per version.
    pub dists_dir: PathBuf, // <root>/.config-home/dists

    /// Downloaded distribution archives.
    pub downloads_dir: PathBuf, // <root>/.config-home/downloads

    /// Host serving `/golang/<archive>` files.
    pub download_host: String,

    /// Plain text endpoint returning the latest Go version.
    pub version_url: String,

    /// Total timeout for a single HTTP request.
    pub http_timeout: Duration,

    /// Verify SHA-256 checksums of downloaded archives.
    pub verify_checksums: bool,
}

impl GoEnvironment {
    /// Create an environment rooted at the provided directory, applying
    /// `GOENV_*` environment variable overrides.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut env = Self::from(root);

        if let Some(host) = get_env_var("GOENV_DOWNLOAD_HOST") {
            env.download_host = host;
        }

        if let Some(url) = get_env_var("GOENV_VERSION_URL") {
            env.version_url = url;
        }

        if let Some(timeout) = get_env_duration("GOENV_HTTP_TIMEOUT") {
            env.http_timeout = timeout;
        }

        if is_env_enabled("GOENV_NO_VERIFY") {
            env.verify_checksums = false;
        }

        debug!(
            root = ?env.root,
            download_host = %env.download_host,
            "Creating goenv environment",
        );

        env
    }

    /// Create an environment with default settings, ignoring overrides.
    pub fn from(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let config_dir = root.join(CONFIG_DIR_NAME);

        GoEnvironment {
            root: root.to_path_buf(),
            bin_dir: root.join("bin"),
            cache_dir: config_dir.join("cache"),
            dists_dir: config_dir.join("dists"),
            downloads_dir: config_dir.join("downloads"),
            config_dir,
            download_host: DEFAULT_DOWNLOAD_HOST.into(),
            version_url: DEFAULT_VERSION_URL.into(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            verify_checksums: true,
        }
    }

    /// Create the config, downloads, and distributions directories.
    pub fn ensure_dirs(&self) -> Result<(), GoenvError> {
        for dir in [&self.config_dir, &self.downloads_dir, &self.dists_dir] {
            if dir.exists() {
                continue;
            }

            debug!(dir = ?dir, "Creating directory");

            fs::create_dir_all(dir).map_err(|error| GoenvError::PermissionDenied {
                path: dir.to_path_buf(),
                error: Box::new(error),
            })?;
        }

        Ok(())
    }

    /// Name of the environment, used to decorate the shell prompt.
    pub fn get_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "goenv".into())
    }
}

impl AsRef<GoEnvironment> for GoEnvironment {
    fn as_ref(&self) -> &GoEnvironment {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_layout_from_root() {
        let env = GoEnvironment::from("/tmp/myenv");

        assert_eq!(env.bin_dir, PathBuf::from("/tmp/myenv/bin"));
        assert_eq!(
            env.downloads_dir,
            PathBuf::from("/tmp/myenv/.config-home/downloads")
        );
        assert_eq!(env.dists_dir, PathBuf::from("/tmp/myenv/.config-home/dists"));
        assert_eq!(env.cache_dir, PathBuf::from("/tmp/myenv/.config-home/cache"));
        assert_eq!(env.get_name(), "myenv");
    }
}
