use crate::errors::GoenvError;
use std::env::consts;
use std::fmt;
use tracing::debug;

/// Operating systems that Go publishes tarballs for, and that we know how
/// to activate an environment on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Platform {
    FreeBSD,
    Linux,
    MacOSX,
}

// Keyed by `std::env::consts::OS` (and the Go names, for overrides).
const PLATFORMS: &[(&str, Platform)] = &[
    ("darwin", Platform::MacOSX),
    ("freebsd", Platform::FreeBSD),
    ("linux", Platform::Linux),
    ("macos", Platform::MacOSX),
];

impl Platform {
    /// Look up a platform from an operating system identifier.
    pub fn from_os(os: &str) -> Result<Platform, GoenvError> {
        let os = os.trim().to_lowercase();

        PLATFORMS
            .iter()
            .find(|(key, _)| os == *key)
            .map(|(_, platform)| *platform)
            .ok_or(GoenvError::UnsupportedPlatform(os))
    }

    /// Detect the platform of the running process.
    pub fn detect() -> Result<Platform, GoenvError> {
        Self::from_os(consts::OS)
    }

    /// Name used by Go in its distribution file names.
    pub fn as_go_str(&self) -> &'static str {
        match self {
            Self::FreeBSD => "freebsd",
            Self::Linux => "linux",
            Self::MacOSX => "darwin",
        }
    }

    /// Extension (without dot) of the distribution archive.
    pub fn archive_ext(&self) -> &'static str {
        "tar.gz"
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_go_str())
    }
}

/// CPU architectures that Go publishes tarballs for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arch {
    Amd64,
    Arm64,
    X386,
}

impl Arch {
    /// Parse either a Rust (`x86_64`) or Go (`amd64`) architecture name.
    pub fn from_name(name: &str) -> Result<Arch, GoenvError> {
        match name.trim().to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Ok(Self::Amd64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            "x86" | "386" | "i386" | "i686" => Ok(Self::X386),
            other => Err(GoenvError::UnsupportedArchitecture(other.to_owned())),
        }
    }

    /// Detect the architecture of the running process. Unknown 64-bit
    /// targets fall back to amd64 and 32-bit ones to 386.
    pub fn detect() -> Result<Arch, GoenvError> {
        Self::from_name(consts::ARCH).or_else(|error| {
            debug!(arch = consts::ARCH, "Unknown architecture, using pointer width");

            match usize::BITS {
                64 => Ok(Self::Amd64),
                32 => Ok(Self::X386),
                _ => Err(error),
            }
        })
    }

    pub fn as_go_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::X386 => "386",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_go_str())
    }
}

/// A fully resolved request for a single Go distribution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolchainRequest {
    pub version: String,
    pub platform: Platform,
    pub arch: Arch,
}

impl ToolchainRequest {
    pub fn new(version: impl AsRef<str>, platform: Platform, arch: Arch) -> Self {
        Self {
            version: version.as_ref().to_owned(),
            platform,
            arch,
        }
    }

    /// File name of the distribution archive, for example
    /// `go1.20.linux-amd64.tar.gz`.
    pub fn get_archive_file(&self) -> String {
        format!(
            "go{}.{}-{}.{}",
            self.version,
            self.platform.as_go_str(),
            self.arch.as_go_str(),
            self.platform.archive_ext()
        )
    }

    /// URL of the distribution archive on the provided host.
    pub fn get_download_url(&self, host: &str) -> String {
        format!(
            "{}/golang/{}",
            host.trim_end_matches('/'),
            self.get_archive_file()
        )
    }
}
