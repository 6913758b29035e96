use crate::activator::{EnvironmentMaterializer, find_gopath_entries, get_goroot};
use crate::downloader::{DistributionCache, OnChunkFn, create_http_client};
use crate::env::GoEnvironment;
use crate::errors::GoenvError;
use crate::installer::Extractor;
use crate::platform::{Arch, Platform, ToolchainRequest};
use crate::version_resolver::VersionResolver;
use starbase_styles::color;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct InstallOptions {
    /// Explicit version, or `None`/`latest` for the latest release.
    pub version: Option<String>,

    /// Directories to keep out of GOPATH.
    pub exclude: Vec<PathBuf>,

    /// Only download and extract, don't write an activation script.
    pub install_only: bool,

    /// Force a platform instead of detecting it.
    pub platform: Option<Platform>,

    /// Force an architecture instead of detecting it.
    pub arch: Option<Arch>,
}

#[derive(Debug, PartialEq)]
pub enum InstallOutcome {
    Activated {
        goroot: PathBuf,
        script: PathBuf,
        version: String,
    },
    InstallOnly {
        goroot: PathBuf,
        version: String,
    },
}

impl InstallOutcome {
    pub fn get_goroot(&self) -> &PathBuf {
        match self {
            Self::Activated { goroot, .. } | Self::InstallOnly { goroot, .. } => goroot,
        }
    }
}

/// Sequences the pipeline: resolve, prepare directories, download,
/// extract, and activate. The first failing stage aborts the run.
pub struct InstallWorkflow<'env> {
    env: &'env GoEnvironment,
    client: reqwest::Client,
}

impl<'env> InstallWorkflow<'env> {
    pub fn new(env: &'env GoEnvironment) -> Result<Self, GoenvError> {
        Ok(Self {
            client: create_http_client(env)?,
            env,
        })
    }

    pub async fn run(
        &self,
        options: InstallOptions,
        on_chunk: &OnChunkFn<'_>,
    ) -> Result<InstallOutcome, GoenvError> {
        // Detect first, so nothing is touched on unsupported systems
        let platform = match options.platform {
            Some(platform) => platform,
            None => Platform::detect()?,
        };
        let arch = match options.arch {
            Some(arch) => arch,
            None => Arch::detect()?,
        };

        let version = VersionResolver::new(self.env, &self.client)
            .resolve(options.version.as_deref())
            .await?;
        let request = ToolchainRequest::new(&version, platform, arch);

        debug!(
            version = &request.version,
            platform = %platform,
            arch = %arch,
            "Installing Go toolchain",
        );

        self.env.ensure_dirs()?;

        let archive_file = DistributionCache::new(self.env, &self.client)
            .fetch(&request, on_chunk)
            .await?;

        let install_dir = Extractor::new(&self.env.dists_dir).extract(&archive_file, &version)?;
        let goroot = get_goroot(&install_dir);

        if options.install_only {
            info!("Go {} installed to {}", version, color::path(&goroot));

            return Ok(InstallOutcome::InstallOnly { goroot, version });
        }

        let extra_paths = find_gopath_entries(&self.env.root, &options.exclude)?;
        let script = EnvironmentMaterializer::new(self.env).materialize(
            &install_dir,
            &version,
            &extra_paths,
        )?;

        Ok(InstallOutcome::Activated {
            goroot,
            script,
            version,
        })
    }
}
