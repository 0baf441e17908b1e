// src/launch/launcher.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::errors::{LaunchError, Result};
use crate::launch::config::LauncherConfig;
use crate::launch::process::{CompletedRun, Invocation, RunningProcess};
use crate::launch::request::InvocationRequest;
use crate::locate::{Locator, SearchSpec};
use crate::types::{ensure_no_nul, JavaOptions};

/// Observable resolution state of a [`Launcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherState {
    /// No executable path yet; the next invocation will search for one.
    Unconfigured,
    /// Path cached; invocations use it directly.
    Ready(PathBuf),
}

/// Resolves the Java binary once and launches it with `-cp`.
///
/// `invoke` takes `&self` and may run concurrently from many tasks (share
/// the launcher through an `Arc`). The first invocation that finds no
/// cached path performs the search; concurrent callers wait for it and then
/// see the same path. Reconfiguring takes `&mut self`, so it cannot overlap
/// with an invocation in flight.
#[derive(Debug)]
pub struct Launcher {
    locator: Locator,
    search: SearchSpec,
    resolved: OnceCell<PathBuf>,
    options: Vec<String>,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(LauncherConfig::default())
    }
}

impl Launcher {
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_locator(config, Locator::new())
    }

    /// Launcher whose searches go through the given locator.
    pub fn with_locator(config: LauncherConfig, locator: Locator) -> Self {
        let LauncherConfig {
            java,
            options,
            search,
        } = config;
        Self {
            locator,
            search,
            resolved: OnceCell::new_with(java),
            options,
        }
    }

    /// Set the executable path and/or the global options.
    ///
    /// - `Some(path)` equal to the cached path changes nothing.
    /// - `Some(path)` otherwise replaces the cached path.
    /// - `None` drops the cached path; the next invocation searches again.
    /// - `options: None` keeps the current options.
    pub fn configure(&mut self, java: Option<PathBuf>, options: Option<JavaOptions>) {
        match java {
            Some(path) if self.resolved.get() == Some(&path) => {
                debug!(path = %path.display(), "java path unchanged");
            }
            Some(path) => {
                info!(path = %path.display(), "java path configured");
                self.resolved = OnceCell::new_with(Some(path));
            }
            None => {
                debug!("java path cleared; will search on next invocation");
                self.resolved = OnceCell::new();
            }
        }

        if let Some(options) = options {
            self.options = options.tokens();
            debug!(options = ?self.options, "java options configured");
        }
    }

    pub fn state(&self) -> LauncherState {
        match self.resolved.get() {
            Some(path) => LauncherState::Ready(path.clone()),
            None => LauncherState::Unconfigured,
        }
    }

    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved.get().map(PathBuf::as_path)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn search_spec(&self) -> &SearchSpec {
        &self.search
    }

    /// Cached executable path, searching for it first if needed.
    ///
    /// A failed search is not cached; the next call searches again.
    pub async fn resolve(&self) -> Result<&Path> {
        let path = self
            .resolved
            .get_or_try_init(|| async {
                let locator = self.locator.clone();
                let spec = self.search.clone();
                debug!(lookup = spec.name(), "searching for executable");

                let found = tokio::task::spawn_blocking(move || locator.find_first(&spec))
                    .await
                    .context("executable search task failed")??;

                info!(
                    path = %found.path.display(),
                    source = %found.source,
                    "resolved executable"
                );
                Ok::<_, LaunchError>(found.into_path())
            })
            .await?;
        Ok(path.as_path())
    }

    /// Start the program described by `request`.
    ///
    /// Blocking requests return [`Invocation::Completed`] or fail with
    /// [`LaunchError::ProcessFailed`] on a nonzero exit; non-blocking ones
    /// return [`Invocation::Running`] right after the spawn.
    pub async fn invoke(&self, request: InvocationRequest) -> Result<Invocation> {
        let blocking = request.blocking;
        let process = self.start(request).await?;
        if blocking {
            process.finish().await.map(Invocation::Completed)
        } else {
            Ok(Invocation::Running(process))
        }
    }

    /// Blocking invocation regardless of `request.blocking`.
    pub async fn run(&self, request: InvocationRequest) -> Result<CompletedRun> {
        self.start(request).await?.finish().await
    }

    /// Non-blocking invocation regardless of `request.blocking`.
    pub async fn spawn(&self, request: InvocationRequest) -> Result<RunningProcess> {
        self.start(request).await
    }

    async fn start(&self, request: InvocationRequest) -> Result<RunningProcess> {
        request.validate()?;
        for option in &self.options {
            ensure_no_nul("java option", option)?;
        }

        let program = self.resolve().await?;
        let classpath = request.classpath.normalize();
        let argv = build_argv(program, &self.options, &classpath, &request.args);
        let shown = display_argv(&argv);

        let InvocationRequest {
            stdin,
            stdout,
            stderr,
            timeout,
            ..
        } = request;

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..])
            .stdin(stdin.into_stdio())
            .stdout(stdout.into_stdio())
            .stderr(stderr.into_stdio())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!(argv = ?shown, error = %e, "failed to start java process");
                return Err(LaunchError::IoError(e));
            }
        };

        info!(argv = ?shown, pid = ?child.id(), "started java process");

        Ok(RunningProcess::new(child, shown, timeout))
    }
}

/// `[program] + options + ["-cp", classpath] + args`.
pub fn build_argv(
    program: &Path,
    options: &[String],
    classpath: &str,
    args: &[String],
) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(options.len() + args.len() + 3);
    argv.push(program.as_os_str().to_os_string());
    argv.extend(options.iter().map(OsString::from));
    argv.push(OsString::from("-cp"));
    argv.push(OsString::from(classpath));
    argv.extend(args.iter().map(OsString::from));
    argv
}

fn display_argv(argv: &[OsString]) -> Vec<String> {
    argv.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}
