// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::graphgen;
use crate::locate::SearchSpec;
use crate::types::{Classpath, JavaOptions};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [java]
/// path = "/usr/lib/jvm/default/bin/java"
/// options = "-Xmx10G"
///
/// [search]
/// env_vars = ["JAVA_HOME"]
///
/// [run]
/// classpath = ["lib/app.jar", "."]
/// timeout = "30s"
///
/// [graphgen]
/// jar = "lib/graphgen.jar"
/// dbname = "imdb"
/// ```
///
/// All sections are optional. An empty file describes the default Java
/// search with no explicit binary.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub java: JavaSection,

    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub run: RunSection,

    /// Present only when the file has a `[graphgen]` table.
    #[serde(default)]
    pub graphgen: Option<GraphGenSection>,
}

/// `[java]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct JavaSection {
    /// Explicit binary. When set, no search happens.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Global JVM options, as one string or a list.
    #[serde(default)]
    pub options: Option<JavaOptions>,
}

/// `[search]` section. Defaults describe the stock Java search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_search_name")]
    pub name: String,

    #[serde(default = "default_env_vars")]
    pub env_vars: Vec<String>,

    #[serde(default = "default_alternates")]
    pub alternates: Vec<String>,

    #[serde(default)]
    pub searchpath: Vec<PathBuf>,

    #[serde(default = "default_url")]
    pub url: Option<String>,

    /// Report every candidate at `info` instead of `debug`.
    #[serde(default)]
    pub verbose: bool,
}

fn default_search_name() -> String {
    SearchSpec::java().name().to_string()
}

fn default_env_vars() -> Vec<String> {
    SearchSpec::java().env_vars().to_vec()
}

fn default_alternates() -> Vec<String> {
    SearchSpec::java().alternates().to_vec()
}

fn default_url() -> Option<String> {
    SearchSpec::java().url().map(str::to_string)
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            name: default_search_name(),
            env_vars: default_env_vars(),
            alternates: default_alternates(),
            searchpath: Vec::new(),
            url: default_url(),
            verbose: false,
        }
    }
}

/// `[run]` section: defaults for `javalaunch run`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunSection {
    #[serde(default)]
    pub classpath: Option<Classpath>,

    /// Duration string such as `"30s"` or `"500ms"`.
    #[serde(default)]
    pub timeout: Option<String>,
}

/// `[graphgen]` section: database connection and jar for extractions.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphGenSection {
    pub jar: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub dbname: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

fn default_host() -> String {
    graphgen::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    graphgen::DEFAULT_PORT
}

fn default_username() -> String {
    graphgen::DEFAULT_USERNAME.to_string()
}

/// Validated configuration.
///
/// Built from [`RawConfigFile`] through `TryFrom` (see `validate.rs`).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub java: JavaSection,
    pub search: SearchSection,
    pub classpath: Option<Classpath>,
    pub timeout: Option<Duration>,
    pub graphgen: Option<GraphGenSection>,
}

impl ConfigFile {
    /// Assemble without validation. Only `validate.rs` should call this.
    pub(crate) fn new_unchecked(
        java: JavaSection,
        search: SearchSection,
        classpath: Option<Classpath>,
        timeout: Option<Duration>,
        graphgen: Option<GraphGenSection>,
    ) -> Self {
        Self {
            java,
            search,
            classpath,
            timeout,
            graphgen,
        }
    }

    /// The `[search]` section as a [`SearchSpec`].
    pub fn search_spec(&self) -> SearchSpec {
        let s = &self.search;
        let builder = SearchSpec::builder(&s.name)
            .env_vars(s.env_vars.iter().cloned())
            .alternates(s.alternates.iter().cloned())
            .searchpath(s.searchpath.iter().cloned())
            .verbose(s.verbose);
        match &s.url {
            Some(url) => builder.url(url).build(),
            None => builder.build(),
        }
    }
}
