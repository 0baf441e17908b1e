// src/launch/mod.rs

//! Launching the resolved Java binary.
//!
//! - [`config`] holds the immutable [`LauncherConfig`] value.
//! - [`request`] describes a single call ([`InvocationRequest`], [`Redirect`]).
//! - [`launcher`] owns path resolution and builds the command line.
//! - [`process`] collects output from blocking calls and wraps live children
//!   for non-blocking ones.

pub mod config;
pub mod launcher;
pub mod process;
pub mod request;

pub use config::LauncherConfig;
pub use launcher::{build_argv, Launcher, LauncherState};
pub use process::{CompletedRun, Invocation, RunningProcess};
pub use request::{InvocationRequest, Redirect};
