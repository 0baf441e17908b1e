// src/locate/mod.rs

//! Multi-source search for an executable (or a directory).
//!
//! - [`spec`] defines the immutable [`SearchSpec`].
//! - [`candidates`] owns the ordered, lazy [`Candidates`] iterator.
//! - [`env`] abstracts environment variable reads.
//! - [`probe`] wraps the system `which` lookup.
//!
//! [`Locator`] ties these to a filesystem and is cheap to clone.

pub mod candidates;
pub mod env;
pub mod probe;
pub mod spec;

use std::sync::Arc;

use tracing::debug;

use crate::errors::{LaunchError, LookupFailure, Result};
use crate::fs::{FileSystem, RealFileSystem};

pub use candidates::{Candidate, CandidateSource, Candidates};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use probe::{PathProbe, ProbeOutcome, WhichProbe};
pub use spec::{SearchSpec, SearchSpecBuilder};

/// Searches for targets described by a [`SearchSpec`].
#[derive(Debug, Clone)]
pub struct Locator {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvSource>,
    path_probe: Option<Arc<dyn PathProbe>>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator {
    /// Locator over the real filesystem and process environment.
    ///
    /// The system `PATH` probe is only enabled on unix hosts.
    pub fn new() -> Self {
        let path_probe: Option<Arc<dyn PathProbe>> = if cfg!(unix) {
            Some(Arc::new(WhichProbe))
        } else {
            None
        };

        Self {
            fs: Arc::new(RealFileSystem),
            env: Arc::new(ProcessEnv),
            path_probe,
        }
    }

    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    pub fn with_env(mut self, env: impl EnvSource + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    pub fn with_path_probe(mut self, probe: impl PathProbe + 'static) -> Self {
        self.path_probe = Some(Arc::new(probe));
        self
    }

    /// Skip the system `PATH` stage entirely.
    pub fn without_path_probe(mut self) -> Self {
        self.path_probe = None;
        self
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    pub fn path_probe(&self) -> Option<&dyn PathProbe> {
        self.path_probe.as_deref()
    }

    /// Ordered, lazy sequence of everything that could be the target.
    ///
    /// Nothing is probed until the iterator is advanced.
    pub fn locate<'a>(&'a self, spec: &'a SearchSpec) -> Candidates<'a> {
        Candidates::new(self, spec)
    }

    /// First candidate, or a [`LookupFailure`] describing what was searched.
    pub fn find_first(&self, spec: &SearchSpec) -> Result<Candidate> {
        match self.locate(spec).next() {
            Some(found) => found,
            None => Err(lookup_failure(spec)),
        }
    }

    /// Every candidate, in order. Fails like [`Locator::find_first`] when the
    /// sequence is empty.
    pub fn find_all(&self, spec: &SearchSpec) -> Result<Vec<Candidate>> {
        let all = self.locate(spec).collect::<Result<Vec<_>>>()?;
        if all.is_empty() {
            return Err(lookup_failure(spec));
        }
        Ok(all)
    }
}

fn lookup_failure(spec: &SearchSpec) -> LaunchError {
    debug!(
        lookup = spec.name(),
        env_vars = ?spec.env_vars(),
        searchpath = ?spec.searchpath(),
        "search exhausted without a candidate"
    );
    LaunchError::Lookup(LookupFailure {
        target: spec.name().to_string(),
        env_vars: spec.env_vars().to_vec(),
        searchpath: spec.searchpath().to_vec(),
        url: spec.url().map(str::to_string),
    })
}
