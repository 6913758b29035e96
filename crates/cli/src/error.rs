use miette::Diagnostic;
use starbase_styles::{Style, Stylize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum GoenvCliError {
    #[diagnostic(code(goenv::cli::invalid_basedir))]
    #[error(
        "Unable to create an environment at {}, as it is not a directory.",
        .path.style(Style::Path),
    )]
    InvalidBaseDir { path: PathBuf },

    #[diagnostic(code(goenv::cli::missing_working_dir))]
    #[error("Unable to determine the current working directory.")]
    MissingWorkingDir(#[source] std::io::Error),
}
