// src/graphgen.rs

//! GraphGen extraction: runs the GraphGen jar against a relational database
//! and serializes the extracted graph to disk.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GraphGenSection;
use crate::errors::{LaunchError, Result};
use crate::launch::{CompletedRun, InvocationRequest, Launcher};
use crate::types::SerializationFormat;

/// Entry point class inside the GraphGen jar.
pub const GENERATOR_CLASS: &str = "com.umdb.graphgen.PyGenerateGraph";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_USERNAME: &str = "postgres";

/// Database the extraction query runs against.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConnection {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub username: String,
    pub password: String,
}

impl DbConnection {
    /// Connection to `dbname` on the default host, port and user, with an
    /// empty password.
    pub fn new(dbname: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dbname: dbname.into(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
        }
    }
}

// Keep the password out of logs.
impl fmt::Debug for DbConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Output of a successful extraction.
#[derive(Debug)]
pub struct GraphArtifact {
    /// `<output_name>.<format>`, relative to the child's working directory.
    pub path: PathBuf,
    pub run: CompletedRun,
}

#[derive(Debug, Clone)]
pub struct GraphGenerator {
    connection: DbConnection,
    jar: PathBuf,
}

impl GraphGenerator {
    pub fn new(connection: DbConnection, jar: impl Into<PathBuf>) -> Self {
        Self {
            connection,
            jar: jar.into(),
        }
    }

    pub fn from_section(section: &GraphGenSection) -> Self {
        Self::new(
            DbConnection {
                host: section.host.clone(),
                port: section.port,
                dbname: section.dbname.clone(),
                username: section.username.clone(),
                password: section.password.clone(),
            },
            &section.jar,
        )
    }

    pub fn connection(&self) -> &DbConnection {
        &self.connection
    }

    pub fn jar(&self) -> &Path {
        &self.jar
    }

    /// Arguments after `-cp <jar>`: the generator class, then query, format,
    /// output name and the connection fields.
    pub fn command_args(
        &self,
        query: &str,
        output_name: &str,
        format: SerializationFormat,
    ) -> Vec<String> {
        let c = &self.connection;
        vec![
            GENERATOR_CLASS.to_string(),
            query.to_string(),
            format.as_str().to_string(),
            output_name.to_string(),
            c.host.clone(),
            c.port.to_string(),
            c.dbname.clone(),
            c.username.clone(),
            c.password.clone(),
        ]
    }

    /// Run one extraction and wait for it.
    ///
    /// Output is captured; a nonzero exit surfaces as
    /// [`LaunchError::ProcessFailed`] with GraphGen's stderr attached.
    pub async fn generate_graph(
        &self,
        launcher: &Launcher,
        query: &str,
        output_name: &str,
        format: SerializationFormat,
    ) -> Result<GraphArtifact> {
        if query.trim().is_empty() {
            return Err(LaunchError::ConfigError(
                "extraction query must not be empty".to_string(),
            ));
        }
        if output_name.is_empty() {
            return Err(LaunchError::ConfigError(
                "output name must not be empty".to_string(),
            ));
        }

        let classpath = self.jar.to_string_lossy().into_owned();
        let request =
            InvocationRequest::new(self.command_args(query, output_name, format), classpath)
                .piped();

        let run = launcher.run(request).await?;
        let path = PathBuf::from(format!("{output_name}.{format}"));

        info!(
            output = %path.display(),
            dbname = %self.connection.dbname,
            "graph extraction finished"
        );

        Ok(GraphArtifact { path, run })
    }
}
