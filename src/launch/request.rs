// src/launch/request.rs

use std::fs::File;
use std::process::Stdio;
use std::time::Duration;

use crate::errors::Result;
use crate::types::{ensure_no_nul, Classpath};

/// What to connect one of the child's standard streams to.
#[derive(Debug, Default)]
pub enum Redirect {
    /// Share the caller's stream.
    #[default]
    Inherit,
    /// New pipe; blocking calls collect it into memory.
    Pipe,
    /// `/dev/null` (or the platform equivalent).
    Null,
    /// An explicit handle, e.g. an open file.
    Handle(Stdio),
}

impl Redirect {
    pub(crate) fn into_stdio(self) -> Stdio {
        match self {
            Redirect::Inherit => Stdio::inherit(),
            Redirect::Pipe => Stdio::piped(),
            Redirect::Null => Stdio::null(),
            Redirect::Handle(stdio) => stdio,
        }
    }
}

impl From<File> for Redirect {
    fn from(file: File) -> Self {
        Redirect::Handle(Stdio::from(file))
    }
}

/// One call to the launched program.
///
/// Defaults: all streams inherited, blocking, no deadline.
#[derive(Debug)]
pub struct InvocationRequest {
    /// Main class (or `-jar` etc.) followed by program arguments.
    pub args: Vec<String>,
    pub classpath: Classpath,
    pub stdin: Redirect,
    pub stdout: Redirect,
    pub stderr: Redirect,
    /// Wait for the child and collect its output (`true`) or hand back a
    /// live handle (`false`).
    pub blocking: bool,
    /// Kill the child if a blocking call has not finished in time.
    pub timeout: Option<Duration>,
}

impl InvocationRequest {
    pub fn new<I, S>(args: I, classpath: impl Into<Classpath>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            classpath: classpath.into(),
            stdin: Redirect::Inherit,
            stdout: Redirect::Inherit,
            stderr: Redirect::Inherit,
            blocking: true,
            timeout: None,
        }
    }

    pub fn with_stdin(mut self, redirect: Redirect) -> Self {
        self.stdin = redirect;
        self
    }

    pub fn with_stdout(mut self, redirect: Redirect) -> Self {
        self.stdout = redirect;
        self
    }

    pub fn with_stderr(mut self, redirect: Redirect) -> Self {
        self.stderr = redirect;
        self
    }

    /// Pipe both stdout and stderr.
    pub fn piped(self) -> Self {
        self.with_stdout(Redirect::Pipe).with_stderr(Redirect::Pipe)
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.classpath.validate()?;
        for arg in &self.args {
            ensure_no_nul("argument", arg)?;
        }
        Ok(())
    }
}
