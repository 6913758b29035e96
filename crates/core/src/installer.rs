use crate::errors::GoenvError;
use flate2::read::GzDecoder;
use starbase_styles::color;
use starbase_utils::fs;
use std::io;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};

/// Unpacks distribution archives into version keyed directories.
pub struct Extractor<'dir> {
    target_root: &'dir Path,
}

impl<'dir> Extractor<'dir> {
    pub fn new(target_root: &'dir Path) -> Self {
        Self { target_root }
    }

    /// Return an absolute path to the directory containing the version.
    /// This is typically `.config-home/dists/<version>`.
    pub fn get_install_dir(&self, version: &str) -> PathBuf {
        self.target_root.join(version)
    }

    /// Unpack the archive unless the version has already been extracted.
    /// The install directory only exists once extraction has completed.
    pub fn extract(&self, archive_file: &Path, version: &str) -> Result<PathBuf, GoenvError> {
        let install_dir = self.get_install_dir(version);

        if install_dir.exists() {
            info!(
                "Go version {} already exists, skipping extract",
                color::hash(version)
            );

            return Ok(install_dir);
        }

        if !archive_file.exists() {
            return Err(GoenvError::InstallMissingDownload(archive_file.to_path_buf()));
        }

        info!(
            "Extracting {} to {}",
            color::path(archive_file),
            color::path(&install_dir)
        );

        let staging_dir = self.target_root.join(format!(".{version}.partial"));

        if staging_dir.exists() {
            debug!(dir = ?staging_dir, "Removing leftover staging directory");

            fs::remove_dir_all(&staging_dir)?;
        }

        if let Err(error) = untar_gzip(archive_file, &staging_dir) {
            let _ = fs::remove_dir_all(&staging_dir);

            return Err(error);
        }

        fs::rename(&staging_dir, &install_dir)?;

        debug!("Successfully extracted archive");

        Ok(install_dir)
    }
}

#[tracing::instrument]
pub fn untar_gzip(input_file: &Path, output_dir: &Path) -> Result<(), GoenvError> {
    let handle_error = |error: io::Error| GoenvError::ExtractFailed {
        archive: input_file.to_path_buf(),
        dir: output_dir.to_path_buf(),
        error,
    };

    debug!(
        input_file = %input_file.display(),
        output_dir = %output_dir.display(),
        "Unpacking tar archive",
    );

    fs::create_dir_all(output_dir)?;

    let tar_gz = fs::open_file(input_file)?;
    let mut archive = Archive::new(GzDecoder::new(tar_gz));

    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    for entry_result in archive.entries().map_err(handle_error)? {
        let mut entry = entry_result.map_err(handle_error)?;

        // Refuses paths that would escape the output directory
        entry.unpack_in(output_dir).map_err(handle_error)?;
    }

    Ok(())
}
