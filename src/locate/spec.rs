// src/locate/spec.rs

use std::path::{Path, PathBuf};

/// Description of where and how to look for a target file.
///
/// Immutable once built; use [`SearchSpec::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    name: String,
    override_path: Option<PathBuf>,
    env_vars: Vec<String>,
    alternates: Vec<String>,
    searchpath: Vec<PathBuf>,
    url: Option<String>,
    verbose: bool,
    finding_dir: bool,
}

impl SearchSpec {
    pub fn builder(name: impl Into<String>) -> SearchSpecBuilder {
        SearchSpecBuilder::new(name)
    }

    /// Default spec for a Java runtime binary.
    ///
    /// Checks `JAVAHOME` then `JAVA_HOME`; also accepts `java.exe` on Windows.
    pub fn java() -> Self {
        let builder = SearchSpec::builder("java")
            .env_var("JAVAHOME")
            .env_var("JAVA_HOME")
            .url("https://www.java.com/en/download/");
        if cfg!(windows) {
            builder.alternate("java.exe").build()
        } else {
            builder.build()
        }
    }

    /// Builder seeded with this spec, for layering more settings on top.
    pub fn into_builder(self) -> SearchSpecBuilder {
        SearchSpecBuilder { spec: self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn override_path(&self) -> Option<&Path> {
        self.override_path.as_deref()
    }

    pub fn env_vars(&self) -> &[String] {
        &self.env_vars
    }

    pub fn alternates(&self) -> &[String] {
        &self.alternates
    }

    pub fn searchpath(&self) -> &[PathBuf] {
        &self.searchpath
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn finding_dir(&self) -> bool {
        self.finding_dir
    }

    /// Every file name accepted as a match: the target name first, then the
    /// alternates in listed order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alternates.iter().map(String::as_str))
    }

    /// Directory that step one joins names onto: the override when given,
    /// otherwise the target name itself.
    pub fn target_dir(&self) -> PathBuf {
        self.override_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.name))
    }
}

#[derive(Debug, Clone)]
pub struct SearchSpecBuilder {
    spec: SearchSpec,
}

impl SearchSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: SearchSpec {
                name: name.into(),
                override_path: None,
                env_vars: Vec::new(),
                alternates: Vec::new(),
                searchpath: Vec::new(),
                url: None,
                verbose: false,
                finding_dir: false,
            },
        }
    }

    pub fn override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.spec.override_path = Some(path.into());
        self
    }

    pub fn env_var(mut self, var: impl Into<String>) -> Self {
        self.spec.env_vars.push(var.into());
        self
    }

    pub fn env_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.env_vars.extend(vars.into_iter().map(Into::into));
        self
    }

    pub fn alternate(mut self, name: impl Into<String>) -> Self {
        self.spec.alternates.push(name.into());
        self
    }

    pub fn alternates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.alternates.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spec.searchpath.push(dir.into());
        self
    }

    pub fn searchpath<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.spec.searchpath.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.spec.url = Some(url.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.spec.verbose = verbose;
        self
    }

    pub fn finding_dir(mut self, finding_dir: bool) -> Self {
        self.spec.finding_dir = finding_dir;
        self
    }

    pub fn build(self) -> SearchSpec {
        self.spec
    }
}
