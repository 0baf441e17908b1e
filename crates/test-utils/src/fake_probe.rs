use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use javalaunch::errors::{LaunchError, Result};
use javalaunch::locate::{PathProbe, ProbeOutcome};

/// A `PATH` probe that:
/// - records every name it was asked about
/// - answers from a fixed table (absent otherwise)
/// - can simulate an interrupted lookup.
///
/// Clones share the call log.
#[derive(Debug, Clone, Default)]
pub struct FakePathProbe {
    answers: HashMap<String, String>,
    interrupt: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakePathProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.answers.insert(name.into(), path.into());
        self
    }

    pub fn interrupt_on(mut self, name: impl Into<String>) -> Self {
        self.interrupt.insert(name.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PathProbe for FakePathProbe {
    fn lookup(&self, name: &str) -> Result<ProbeOutcome> {
        self.calls.lock().unwrap().push(name.to_string());

        if self.interrupt.contains(name) {
            return Err(LaunchError::SearchInterrupted(format!(
                "fake interrupt while looking up {name}"
            )));
        }
        Ok(match self.answers.get(name) {
            Some(path) => ProbeOutcome::Found(path.clone()),
            None => ProbeOutcome::Absent,
        })
    }
}
