mod activator;
mod downloader;
mod env;
mod errors;
mod helpers;
mod installer;
mod platform;
mod verifier;
mod version_resolver;
mod workflow;

pub use activator::*;
pub use downloader::*;
pub use env::*;
pub use errors::*;
pub use helpers::*;
pub use installer::*;
pub use platform::*;
pub use starbase_styles::color;
pub use verifier::*;
pub use version_resolver::*;
pub use workflow::*;
