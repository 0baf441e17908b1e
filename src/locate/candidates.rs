// src/locate/candidates.rs

//! Lazy, ordered candidate sequence.
//!
//! The search runs in four stages (target dir, environment variables,
//! search path, system `PATH`). A stage's probes are planned only when the
//! previous stage is exhausted, and each probe is evaluated only when the
//! consumer asks for the next item. Dropping the iterator early therefore
//! never touches later sources, in particular never spawns `which`.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::Result;
use crate::locate::probe::ProbeOutcome;
use crate::locate::{Locator, SearchSpec};

/// Sub-directory name probed next to every target directory.
pub const FILE_SUBDIR: &str = "file";

/// Where a candidate was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// `join(target, name)`, where target is the override path or the name.
    TargetDir,
    /// The bare name, relative to the working directory.
    BareName,
    /// `join(target, "file", name)`.
    FileSubdir,
    /// Derived from the named environment variable.
    EnvVar(String),
    /// One of the explicit search directories.
    SearchPath,
    /// Reported by the system `PATH` probe.
    SystemPath,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::TargetDir => f.write_str("target dir"),
            CandidateSource::BareName => f.write_str("bare name"),
            CandidateSource::FileSubdir => f.write_str("file subdir"),
            CandidateSource::EnvVar(var) => write!(f, "env ${var}"),
            CandidateSource::SearchPath => f.write_str("search path"),
            CandidateSource::SystemPath => f.write_str("system PATH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    TargetDir,
    EnvVars,
    SearchPath,
    SystemPath,
    Done,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::TargetDir => Stage::EnvVars,
            Stage::EnvVars => Stage::SearchPath,
            Stage::SearchPath => Stage::SystemPath,
            Stage::SystemPath | Stage::Done => Stage::Done,
        }
    }
}

#[derive(Debug)]
enum Probe {
    /// Accept `path` if it is a regular file.
    File { path: PathBuf, source: CandidateSource },
    /// Accept an environment value unconditionally (directory search).
    Raw { value: OsString, var: String },
    /// Ask the system `PATH` probe about `name`.
    Which { name: String },
}

/// Iterator returned by [`Locator::locate`].
///
/// Yields `Ok(candidate)` in priority order. An `Err` item means the search
/// was interrupted; the iterator is exhausted afterwards. Call
/// [`Locator::locate`] again to restart from the beginning.
#[derive(Debug)]
pub struct Candidates<'a> {
    locator: &'a Locator,
    spec: &'a SearchSpec,
    next_stage: Stage,
    pending: VecDeque<Probe>,
}

impl<'a> Candidates<'a> {
    pub(crate) fn new(locator: &'a Locator, spec: &'a SearchSpec) -> Self {
        Self {
            locator,
            spec,
            next_stage: Stage::TargetDir,
            pending: VecDeque::new(),
        }
    }

    fn plan(&mut self, stage: Stage) {
        match stage {
            Stage::TargetDir => self.plan_target_dir(),
            Stage::EnvVars => self.plan_env_vars(),
            Stage::SearchPath => self.plan_searchpath(),
            Stage::SystemPath => self.plan_system_path(),
            Stage::Done => {}
        }
    }

    fn plan_target_dir(&mut self) {
        let target = self.spec.target_dir();
        for name in self.spec.names() {
            self.pending.push_back(Probe::File {
                path: target.join(name),
                source: CandidateSource::TargetDir,
            });
            self.pending.push_back(Probe::File {
                path: PathBuf::from(name),
                source: CandidateSource::BareName,
            });
            self.pending.push_back(Probe::File {
                path: target.join(FILE_SUBDIR).join(name),
                source: CandidateSource::FileSubdir,
            });
        }
    }

    fn plan_env_vars(&mut self) {
        for var in self.spec.env_vars() {
            let Some(value) = self.locator.env().var_os(var) else {
                debug!(lookup = self.spec.name(), var = %var, "environment variable not set");
                continue;
            };

            if self.spec.finding_dir() {
                self.pending.push_back(Probe::Raw {
                    value,
                    var: var.clone(),
                });
                continue;
            }

            for dir in std::env::split_paths(&value) {
                let source = CandidateSource::EnvVar(var.clone());
                self.pending.push_back(Probe::File {
                    path: dir.clone(),
                    source: source.clone(),
                });
                for name in self.spec.names() {
                    self.pending.push_back(Probe::File {
                        path: dir.join(name),
                        source: source.clone(),
                    });
                    self.pending.push_back(Probe::File {
                        path: dir.join(FILE_SUBDIR).join(name),
                        source: source.clone(),
                    });
                }
            }
        }
    }

    fn plan_searchpath(&mut self) {
        for dir in self.spec.searchpath() {
            for name in self.spec.names() {
                self.pending.push_back(Probe::File {
                    path: dir.join(name),
                    source: CandidateSource::SearchPath,
                });
            }
        }
    }

    fn plan_system_path(&mut self) {
        if self.locator.path_probe().is_none() {
            return;
        }
        for name in self.spec.names() {
            self.pending.push_back(Probe::Which {
                name: name.to_string(),
            });
        }
    }

    fn evaluate(&self, probe: Probe) -> Option<Result<Candidate>> {
        match probe {
            Probe::File { path, source } => self
                .locator
                .fs()
                .is_file(&path)
                .then_some(Ok(Candidate { path, source })),
            Probe::Raw { value, var } => Some(Ok(Candidate {
                path: PathBuf::from(value),
                source: CandidateSource::EnvVar(var),
            })),
            Probe::Which { name } => {
                let probe = self.locator.path_probe()?;
                match probe.lookup(&name) {
                    Ok(ProbeOutcome::Found(answer)) => {
                        let accepted =
                            answer.ends_with(&name) && self.locator.fs().exists(Path::new(&answer));
                        if !accepted {
                            debug!(binary = %name, answer = %answer, "ignoring system PATH answer");
                        }
                        accepted.then(|| {
                            Ok(Candidate {
                                path: PathBuf::from(answer),
                                source: CandidateSource::SystemPath,
                            })
                        })
                    }
                    Ok(ProbeOutcome::Absent) => None,
                    Err(e) => Some(Err(e)),
                }
            }
        }
    }

    fn report(&self, candidate: &Candidate) {
        if self.spec.verbose() {
            info!(
                lookup = self.spec.name(),
                path = %candidate.path.display(),
                source = %candidate.source,
                "found candidate"
            );
        } else {
            debug!(
                lookup = self.spec.name(),
                path = %candidate.path.display(),
                source = %candidate.source,
                "found candidate"
            );
        }
    }
}

impl Iterator for Candidates<'_> {
    type Item = Result<Candidate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(probe) = self.pending.pop_front() {
                match self.evaluate(probe) {
                    Some(Ok(candidate)) => {
                        self.report(&candidate);
                        return Some(Ok(candidate));
                    }
                    Some(Err(e)) => {
                        self.pending.clear();
                        self.next_stage = Stage::Done;
                        return Some(Err(e));
                    }
                    None => {}
                }
            }

            let stage = self.next_stage;
            if stage == Stage::Done {
                return None;
            }
            self.next_stage = stage.next();
            self.plan(stage);
        }
    }
}

impl FusedIterator for Candidates<'_> {}
