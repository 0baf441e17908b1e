// src/errors.rs

//! Crate-wide error type.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{0}")]
    Lookup(LookupFailure),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "command failed with exit code {exit_code}: {}",
        render_argv(.argv)
    )]
    ProcessFailed {
        exit_code: i32,
        stderr: Option<Vec<u8>>,
        argv: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("search interrupted: {0}")]
    SearchInterrupted(String),

    #[error("command timed out after {timeout:?}: {}", render_argv(.argv))]
    TimedOut { timeout: Duration, argv: Vec<String> },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaunchError {
    /// Exit code to hand back to the shell when this error ends the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ProcessFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }

    /// Captured stderr of a failed child, decoded lossily.
    pub fn stderr_lossy(&self) -> Option<String> {
        match self {
            LaunchError::ProcessFailed {
                stderr: Some(bytes),
                ..
            } => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }
}

impl From<LookupFailure> for LaunchError {
    fn from(failure: LookupFailure) -> Self {
        LaunchError::Lookup(failure)
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Everything a user needs to fix their environment after a failed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub target: String,
    pub env_vars: Vec<String>,
    pub searchpath: Vec<PathBuf>,
    pub url: Option<String>,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(75);
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        write!(
            f,
            "Unable to find the {} file!\nUse software specific configuration parameters",
            self.target
        )?;
        match self.env_vars.as_slice() {
            [] => {}
            [only] => write!(f, " or set the {only} environment variable")?,
            many => write!(
                f,
                " or set one of the {} environment variables",
                many.join(", ")
            )?,
        }
        write!(f, ".")?;

        if !self.env_vars.is_empty() {
            write!(f, "\n\n  Checked environment variables:")?;
            for var in &self.env_vars {
                write!(f, "\n    - {var}")?;
            }
        }
        if !self.searchpath.is_empty() {
            write!(f, "\n\n  Searched in:")?;
            for dir in &self.searchpath {
                write!(f, "\n    - {}", dir.display())?;
            }
        }
        if let Some(url) = &self.url {
            write!(
                f,
                "\n\n  For more information on {}, see:\n    <{url}>",
                self.target
            )?;
        }
        writeln!(f)?;
        write!(f, "{rule}")
    }
}

fn render_argv(argv: &[String]) -> String {
    argv.join(" ")
}
