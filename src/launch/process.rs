// src/launch/process.rs

//! Child process handles and output collection.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use tracing::{error, info, warn};

use crate::errors::{LaunchError, Result};

/// Output of a child that exited successfully.
///
/// `stdout` / `stderr` are `Some` only for streams that were piped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub stdout: Option<Vec<u8>>,
    pub stderr: Option<Vec<u8>>,
    pub exit_code: i32,
}

impl CompletedRun {
    pub fn stdout_lossy(&self) -> String {
        lossy(self.stdout.as_deref())
    }

    pub fn stderr_lossy(&self) -> String {
        lossy(self.stderr.as_deref())
    }
}

fn lossy(bytes: Option<&[u8]>) -> String {
    bytes
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default()
}

/// Result of [`crate::launch::Launcher::invoke`].
#[derive(Debug)]
pub enum Invocation {
    Completed(CompletedRun),
    Running(RunningProcess),
}

impl Invocation {
    pub fn completed(self) -> Option<CompletedRun> {
        match self {
            Invocation::Completed(run) => Some(run),
            Invocation::Running(_) => None,
        }
    }

    pub fn running(self) -> Option<RunningProcess> {
        match self {
            Invocation::Running(process) => Some(process),
            Invocation::Completed(_) => None,
        }
    }
}

/// A child started by a non-blocking invocation.
///
/// The handle owns the child. Call [`RunningProcess::finish`] or
/// [`RunningProcess::wait`] to reap it; dropping the handle kills the child.
#[derive(Debug)]
pub struct RunningProcess {
    child: Child,
    argv: Vec<String>,
    timeout: Option<Duration>,
}

impl RunningProcess {
    pub(crate) fn new(child: Child, argv: Vec<String>, timeout: Option<Duration>) -> Self {
        Self {
            child,
            argv,
            timeout,
        }
    }

    /// OS process id, `None` once the child has been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.stdin.take()
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Wait for exit without touching any pipes still attached.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }

    /// Kill the child and reap it.
    pub async fn kill(&mut self) -> Result<()> {
        Ok(self.child.kill().await?)
    }

    /// Wait for exit, collecting whatever pipes are still attached, and apply
    /// the same exit-code rules as a blocking invocation.
    pub async fn finish(self) -> Result<CompletedRun> {
        collect(self.child, self.argv, self.timeout).await
    }
}

/// Drain piped output while waiting for exit, then check the exit code.
///
/// The child has always been reaped when this returns, including when the
/// deadline expires (it is killed first).
pub(crate) async fn collect(
    mut child: Child,
    argv: Vec<String>,
    timeout: Option<Duration>,
) -> Result<CompletedRun> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let drained = {
        let drain = async {
            tokio::try_join!(child.wait(), read_stream(stdout), read_stream(stderr))
        };
        match timeout {
            Some(limit) => tokio::time::timeout(limit, drain)
                .await
                .map_err(|_| limit),
            None => Ok(drain.await),
        }
    };

    let (status, stdout, stderr) = match drained {
        Ok(result) => result?,
        Err(limit) => {
            warn!(argv = ?argv, timeout = ?limit, "deadline expired; killing child process");
            if let Err(e) = child.kill().await {
                warn!(argv = ?argv, error = %e, "failed to kill child process after deadline");
            }
            return Err(LaunchError::TimedOut {
                timeout: limit,
                argv,
            });
        }
    };

    check_status(status, stdout, stderr, argv)
}

fn check_status(
    status: ExitStatus,
    stdout: Option<Vec<u8>>,
    stderr: Option<Vec<u8>>,
    argv: Vec<String>,
) -> Result<CompletedRun> {
    let exit_code = status.code().unwrap_or(-1);

    if !status.success() {
        match &stderr {
            Some(bytes) => error!(
                argv = ?argv,
                exit_code,
                stderr = %String::from_utf8_lossy(bytes),
                "java command failed"
            ),
            None => error!(argv = ?argv, exit_code, "java command failed"),
        }
        return Err(LaunchError::ProcessFailed {
            exit_code,
            stderr,
            argv,
        });
    }

    info!(argv = ?argv, exit_code, "java command finished");
    Ok(CompletedRun {
        stdout,
        stderr,
        exit_code,
    })
}

async fn read_stream<R>(stream: Option<R>) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(Some(buf))
}
