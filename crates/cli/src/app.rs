use clap::builder::BoolishValueParser;
use clap::builder::styling::{Color, Style, Styles};
use clap::{Parser, ValueEnum};
use starbase_styles::color::Color as ColorType;
use std::fmt::{Display, Error, Formatter};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "{}",
            match self {
                LogLevel::Off => "off",
                LogLevel::Error => "error",
                LogLevel::Warn => "warn",
                LogLevel::Info => "info",
                LogLevel::Debug => "debug",
                LogLevel::Trace => "trace",
            }
        )?;

        Ok(())
    }
}

fn fg(ty: ColorType) -> Style {
    Style::new().fg_color(Some(Color::from(ty as u8)))
}

fn create_styles() -> Styles {
    Styles::default()
        .error(fg(ColorType::Red))
        .header(Style::new().bold())
        .invalid(fg(ColorType::Yellow))
        .literal(fg(ColorType::Pink)) // args, options, etc
        .placeholder(fg(ColorType::GrayLight))
        .usage(fg(ColorType::Purple).bold())
        .valid(fg(ColorType::Green))
}

#[derive(Debug, Parser)]
#[command(
    name = "goenv",
    version,
    about = "Create an isolated Go environment with its own toolchain.",
    long_about = "Download a Go toolchain into <BASEDIR>, and write an activation script\nthat exports GOROOT, GOPATH, GOBIN, and GOCACHE for the environment.",
    next_line_help = false,
    styles = create_styles()
)]
pub struct App {
    #[arg(help = "Root directory of the environment")]
    pub basedir: String,

    #[arg(
        short = 'g',
        long = "go-version",
        value_name = "VERSION",
        help = "Go version to install (defaults to the latest release)"
    )]
    pub go_version: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Directory to exclude from GOPATH (can be repeated)"
    )]
    pub exclude: Vec<String>,

    #[arg(
        long,
        help = "Only install Go, and print how to use it instead of writing an activation script"
    )]
    pub install_only: bool,

    #[arg(
        short = 'q',
        long,
        help = "Only output messages that could be helpful in automated scripts"
    )]
    pub quiet: bool,

    #[arg(
        long,
        env = "GOENV_NO_VERIFY",
        value_parser = BoolishValueParser::new(),
        help = "Don't verify the checksum of downloaded archives"
    )]
    pub no_verify: bool,

    #[arg(value_enum, long, env = "GOENV_LOG", help = "Lowest log level to output")]
    pub log: Option<LogLevel>,
}

impl App {
    /// Log level when none was explicitly requested.
    pub fn get_log_level(&self) -> LogLevel {
        match self.log {
            Some(level) => level,
            None if self.quiet => LogLevel::Warn,
            None => LogLevel::default(),
        }
    }

    pub fn get_exclude_paths(&self, working_dir: &std::path::Path) -> Vec<PathBuf> {
        self.exclude
            .iter()
            .map(|path| goenv_core::expand_path(path, working_dir))
            .collect()
    }
}
