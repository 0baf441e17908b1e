// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod graphgen;
pub mod launch;
pub mod locate;
pub mod logging;
pub mod types;

use std::io::Write;

use tracing::debug;

use crate::cli::{CliArgs, Command, GraphArgs, LocateArgs, RunArgs};
use crate::config::ConfigFile;
use crate::errors::{LaunchError, Result};
use crate::graphgen::{DbConnection, GraphGenerator};
use crate::launch::{InvocationRequest, Launcher, LauncherConfig};
use crate::locate::{Locator, SearchSpec};
use crate::types::{Classpath, JavaOptions};

/// High-level entry point used by `main.rs`.
///
/// Loads the config (explicit `--config`, `$JAVALAUNCH_CONFIG`,
/// `Javalaunch.toml`, or built-in defaults), applies the global flags and
/// dispatches to the subcommand.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::discover(args.config.as_deref())?;

    match &args.command {
        Command::Locate(locate) => run_locate(&cfg, locate).await,
        Command::Run(run) => run_java(&cfg, &args, run).await,
        Command::Graph(graph) => run_graph(&cfg, &args, graph).await,
    }
}

/// Launcher configuration from the file, with `--java` / `--java-options`
/// taking precedence.
pub fn launcher_config(cfg: &ConfigFile, args: &CliArgs) -> LauncherConfig {
    let mut launcher = LauncherConfig::from(cfg);
    if let Some(java) = &args.java {
        launcher = launcher.with_java(java);
    }
    if let Some(options) = &args.java_options {
        launcher = launcher.with_options(JavaOptions::Line(options.clone()));
    }
    launcher
}

/// Search spec for `locate`: a fresh spec when `--name` is given, the
/// configured one otherwise, with the repeatable flags layered on top.
pub fn locate_spec(cfg: &ConfigFile, args: &LocateArgs) -> SearchSpec {
    let mut builder = match &args.name {
        Some(name) => SearchSpec::builder(name).verbose(cfg.search.verbose),
        None => cfg.search_spec().into_builder(),
    };

    builder = builder
        .env_vars(args.env_vars.iter().cloned())
        .alternates(args.alternates.iter().cloned())
        .searchpath(args.searchpath.iter().cloned())
        .finding_dir(args.finding_dir);
    if let Some(path) = &args.override_path {
        builder = builder.override_path(path);
    }
    builder.build()
}

async fn run_locate(cfg: &ConfigFile, args: &LocateArgs) -> Result<()> {
    let spec = locate_spec(cfg, args);
    let all = args.all;
    let locator = Locator::new();

    let found = tokio::task::spawn_blocking(move || {
        if all {
            locator.find_all(&spec)
        } else {
            locator.find_first(&spec).map(|c| vec![c])
        }
    })
    .await
    .map_err(anyhow::Error::from)??;

    let mut out = std::io::stdout().lock();
    for candidate in found {
        writeln!(out, "{}", candidate.path.display())?;
    }
    Ok(())
}

async fn run_java(cfg: &ConfigFile, global: &CliArgs, args: &RunArgs) -> Result<()> {
    let classpath = if args.classpath.is_empty() {
        cfg.classpath.clone().ok_or_else(|| {
            LaunchError::ConfigError(
                "no classpath given: pass --cp or set [run].classpath".to_string(),
            )
        })?
    } else {
        Classpath::Many(args.classpath.clone())
    };

    let launcher = Launcher::new(launcher_config(cfg, global));

    let mut request = InvocationRequest::new(args.args.iter().cloned(), classpath);
    if let Some(timeout) = args.timeout.or(cfg.timeout) {
        request = request.with_timeout(timeout);
    }
    if args.capture {
        request = request.piped();
    }

    match launcher.run(request).await {
        Ok(run) => {
            if let Some(bytes) = &run.stdout {
                std::io::stdout().write_all(bytes)?;
            }
            if let Some(bytes) = &run.stderr {
                std::io::stderr().write_all(bytes)?;
            }
            Ok(())
        }
        Err(err) => {
            if let Some(stderr) = err.stderr_lossy() {
                eprint!("{stderr}");
            }
            Err(err)
        }
    }
}

async fn run_graph(cfg: &ConfigFile, global: &CliArgs, args: &GraphArgs) -> Result<()> {
    let generator = graph_generator(cfg, args)?;
    let launcher = Launcher::new(launcher_config(cfg, global));

    let artifact = generator
        .generate_graph(&launcher, &args.query, &args.output, args.format)
        .await?;

    let stdout = artifact.run.stdout_lossy();
    if !stdout.trim().is_empty() {
        debug!(output = %stdout.trim(), "graphgen output");
    }
    println!("{}", artifact.path.display());
    Ok(())
}

/// `[graphgen]` settings with the command-line flags taking precedence.
///
/// Without a `[graphgen]` section, `--jar` and `--dbname` are required.
pub fn graph_generator(cfg: &ConfigFile, args: &GraphArgs) -> Result<GraphGenerator> {
    let base = match &cfg.graphgen {
        Some(section) => GraphGenerator::from_section(section),
        None => {
            let jar = args.jar.clone().ok_or_else(|| {
                LaunchError::ConfigError(
                    "no GraphGen jar given: pass --jar or set [graphgen].jar".to_string(),
                )
            })?;
            let dbname = args.dbname.clone().ok_or_else(|| {
                LaunchError::ConfigError(
                    "no database given: pass --dbname or set [graphgen].dbname".to_string(),
                )
            })?;
            GraphGenerator::new(DbConnection::new(dbname), jar)
        }
    };

    let mut connection = base.connection().clone();
    if let Some(host) = &args.host {
        connection.host = host.clone();
    }
    if let Some(port) = args.port {
        connection.port = port;
    }
    if let Some(dbname) = &args.dbname {
        connection.dbname = dbname.clone();
    }
    if let Some(username) = &args.username {
        connection.username = username.clone();
    }
    if let Some(password) = &args.password {
        connection.password = password.clone();
    }
    let jar = args.jar.clone().unwrap_or_else(|| base.jar().to_path_buf());

    Ok(GraphGenerator::new(connection, jar))
}
