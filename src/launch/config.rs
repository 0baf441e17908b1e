// src/launch/config.rs

use std::path::PathBuf;

use crate::config::ConfigFile;
use crate::locate::SearchSpec;
use crate::types::JavaOptions;

/// Everything a [`crate::launch::Launcher`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Explicit binary; `None` searches with `search` on first use.
    pub java: Option<PathBuf>,
    /// Global options placed before `-cp`.
    pub options: Vec<String>,
    pub search: SearchSpec,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            java: None,
            options: Vec::new(),
            search: SearchSpec::java(),
        }
    }
}

impl LauncherConfig {
    pub fn with_java(mut self, java: impl Into<PathBuf>) -> Self {
        self.java = Some(java.into());
        self
    }

    pub fn with_options(mut self, options: impl Into<JavaOptions>) -> Self {
        self.options = options.into().tokens();
        self
    }

    pub fn with_search(mut self, search: SearchSpec) -> Self {
        self.search = search;
        self
    }
}

impl From<&ConfigFile> for LauncherConfig {
    fn from(cfg: &ConfigFile) -> Self {
        Self {
            java: cfg.java.path.clone(),
            options: cfg
                .java
                .options
                .as_ref()
                .map(JavaOptions::tokens)
                .unwrap_or_default(),
            search: cfg.search_spec(),
        }
    }
}
