// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{parse_timeout, SerializationFormat};

/// Command-line arguments for `javalaunch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "javalaunch",
    version,
    about = "Locate a Java runtime and launch programs with it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `$JAVALAUNCH_CONFIG`, or `Javalaunch.toml` in the current
    /// working directory when it exists.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JAVALAUNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Java binary to use instead of searching for one.
    #[arg(long, value_name = "PATH", global = true)]
    pub java: Option<PathBuf>,

    /// Global JVM options, e.g. "-Xmx10G -Xss4m".
    #[arg(long, value_name = "OPTS", allow_hyphen_values = true, global = true)]
    pub java_options: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print where a file or directory was found.
    Locate(LocateArgs),
    /// Launch java with a classpath.
    Run(RunArgs),
    /// Run a GraphGen extraction.
    Graph(GraphArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    /// Target name (default: the configured search, i.e. `java`).
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Environment variable to check; repeatable.
    #[arg(long = "env", value_name = "VAR")]
    pub env_vars: Vec<String>,

    /// Alternate file name; repeatable.
    #[arg(long = "alt", value_name = "NAME")]
    pub alternates: Vec<String>,

    /// Extra directory to search; repeatable.
    #[arg(long = "search", value_name = "DIR")]
    pub searchpath: Vec<PathBuf>,

    /// Directory joined with each name before anything else.
    #[arg(long = "override", value_name = "PATH")]
    pub override_path: Option<PathBuf>,

    /// Look for a directory: environment values are reported as-is.
    #[arg(long = "dir")]
    pub finding_dir: bool,

    /// Print every candidate instead of the first.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Classpath entry; repeatable. Falls back to `[run].classpath`.
    #[arg(long = "cp", value_name = "ENTRY")]
    pub classpath: Vec<String>,

    /// Kill the child after this long, e.g. "30s" or "500ms".
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<std::time::Duration>,

    /// Capture stdout/stderr and print them after the child exits.
    #[arg(long)]
    pub capture: bool,

    /// Main class followed by program arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct GraphArgs {
    /// Extraction query (GraphGen datalog).
    #[arg(long, value_name = "QUERY")]
    pub query: String,

    /// Output name; the format is appended as extension.
    #[arg(long, value_name = "NAME")]
    pub output: String,

    #[arg(long, value_name = "FORMAT", default_value = "gml")]
    pub format: SerializationFormat,

    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    #[arg(long, value_name = "NAME")]
    pub dbname: Option<String>,

    #[arg(long, value_name = "USER")]
    pub username: Option<String>,

    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// GraphGen jar. Falls back to `[graphgen].jar`.
    #[arg(long, value_name = "PATH")]
    pub jar: Option<PathBuf>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
