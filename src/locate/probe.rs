// src/locate/probe.rs

//! System `PATH` lookup through the `which` utility.

use std::fmt::Debug;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::errors::{LaunchError, Result};

/// Result of asking the system where a name lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Raw, trimmed answer. The locator still checks that it ends with the
    /// probed name and exists on disk.
    Found(String),
    Absent,
}

/// Looks a bare name up on the system `PATH`.
///
/// Implementations must turn ordinary failures into [`ProbeOutcome::Absent`]
/// and only return an error when the search itself should stop
/// ([`LaunchError::SearchInterrupted`]).
pub trait PathProbe: Send + Sync + Debug {
    fn lookup(&self, name: &str) -> Result<ProbeOutcome>;
}

/// Runs `which <name>` as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichProbe;

impl PathProbe for WhichProbe {
    fn lookup(&self, name: &str) -> Result<ProbeOutcome> {
        let output = match Command::new("which")
            .arg(name)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                return Err(LaunchError::SearchInterrupted(format!(
                    "`which {name}` was interrupted: {e}"
                )));
            }
            Err(e) => {
                debug!(binary = %name, error = %e, "could not run `which`; treating as no match");
                return Ok(ProbeOutcome::Absent);
            }
        };

        if let Some(signal) = termination_signal(&output.status) {
            return Err(LaunchError::SearchInterrupted(format!(
                "`which {name}` was terminated by {signal}"
            )));
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if answer.is_empty() {
            Ok(ProbeOutcome::Absent)
        } else {
            Ok(ProbeOutcome::Found(answer))
        }
    }
}

/// Name of the signal that killed the probe, if it is one that means
/// "stop everything" (interrupt, termination, hangup, quit).
#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<&'static str> {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    let raw = status.signal()?;
    match Signal::try_from(raw) {
        Ok(sig @ (Signal::SIGINT | Signal::SIGTERM | Signal::SIGHUP | Signal::SIGQUIT)) => {
            Some(sig.as_str())
        }
        _ => None,
    }
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<&'static str> {
    None
}
