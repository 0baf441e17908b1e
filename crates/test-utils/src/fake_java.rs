//! Shell scripts that stand in for a Java binary.
//!
//! The script records its arguments (one per line) next to itself, writes
//! fixed text to stdout/stderr, optionally copies stdin to stdout, optionally
//! sleeps, then exits with a chosen code. Unix only; the scripts need `/bin/sh`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone, Default)]
pub struct FakeJava {
    exit_code: i32,
    stdout: String,
    stderr: String,
    echo_stdin: bool,
    sleep: Option<Duration>,
}

impl FakeJava {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn stdout(mut self, text: impl Into<String>) -> Self {
        self.stdout = text.into();
        self
    }

    pub fn stderr(mut self, text: impl Into<String>) -> Self {
        self.stderr = text.into();
        self
    }

    /// Copy stdin to stdout (after the fixed stdout text) until EOF.
    pub fn echo_stdin(mut self) -> Self {
        self.echo_stdin = true;
        self
    }

    pub fn sleep(mut self, duration: Duration) -> Self {
        self.sleep = Some(duration);
        self
    }

    /// Write the script as `dir/name` and make it executable.
    pub fn install(&self, dir: &Path, name: &str) -> anyhow::Result<InstalledJava> {
        let path = dir.join(name);
        let args_file = dir.join(format!("{name}.args"));

        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(": > {}\n", quote(&args_file.to_string_lossy())));
        script.push_str(&format!(
            "for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> {}; done\n",
            quote(&args_file.to_string_lossy())
        ));
        if !self.stdout.is_empty() {
            script.push_str(&format!("printf '%s' {}\n", quote(&self.stdout)));
        }
        if !self.stderr.is_empty() {
            script.push_str(&format!("printf '%s' {} >&2\n", quote(&self.stderr)));
        }
        if self.echo_stdin {
            script.push_str("cat\n");
        }
        if let Some(sleep) = self.sleep {
            script.push_str(&format!("sleep {:.3}\n", sleep.as_secs_f64()));
        }
        script.push_str(&format!("exit {}\n", self.exit_code));

        fs::write(&path, script).with_context(|| format!("writing {}", path.display()))?;
        make_executable(&path)?;

        Ok(InstalledJava { path, args_file })
    }
}

/// A script written by [`FakeJava::install`].
#[derive(Debug, Clone)]
pub struct InstalledJava {
    pub path: PathBuf,
    args_file: PathBuf,
}

impl InstalledJava {
    /// Arguments of the most recent run, or an empty list before any run.
    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(&self.args_file)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}
