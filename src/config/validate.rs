// src/config/validate.rs

use crate::config::model::{ConfigFile, GraphGenSection, RawConfigFile};
use crate::errors::{LaunchError, Result};
use crate::types::parse_timeout;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LaunchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let timeout = raw
            .run
            .timeout
            .as_deref()
            .map(parse_timeout)
            .transpose()
            .map_err(|e| LaunchError::ConfigError(format!("[run].timeout: {e}")))?;

        Ok(ConfigFile::new_unchecked(
            raw.java,
            raw.search,
            raw.run.classpath,
            timeout,
            raw.graphgen,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_java(cfg)?;
    validate_search(cfg)?;
    validate_run(cfg)?;
    if let Some(graphgen) = &cfg.graphgen {
        validate_graphgen(graphgen)?;
    }
    Ok(())
}

fn validate_java(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = &cfg.java.path {
        if path.as_os_str().is_empty() {
            return Err(LaunchError::ConfigError(
                "[java].path must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_search(cfg: &RawConfigFile) -> Result<()> {
    if cfg.search.name.trim().is_empty() {
        return Err(LaunchError::ConfigError(
            "[search].name must not be empty".to_string(),
        ));
    }

    for var in &cfg.search.env_vars {
        if var.is_empty() {
            return Err(LaunchError::ConfigError(
                "[search].env_vars contains an empty name".to_string(),
            ));
        }
        if var.contains('=') || var.contains('\0') {
            return Err(LaunchError::ConfigError(format!(
                "[search].env_vars: '{}' is not a valid environment variable name",
                var.escape_debug()
            )));
        }
    }
    Ok(())
}

fn validate_run(cfg: &RawConfigFile) -> Result<()> {
    if let Some(classpath) = &cfg.run.classpath {
        classpath.validate()?;
    }

    if let Some(raw) = &cfg.run.timeout {
        parse_timeout(raw)
            .map_err(|e| LaunchError::ConfigError(format!("[run].timeout: {e}")))?;
    }
    Ok(())
}

fn validate_graphgen(graphgen: &GraphGenSection) -> Result<()> {
    if graphgen.port == 0 {
        return Err(LaunchError::ConfigError(
            "[graphgen].port must be >= 1 (got 0)".to_string(),
        ));
    }
    if graphgen.dbname.trim().is_empty() {
        return Err(LaunchError::ConfigError(
            "[graphgen].dbname must not be empty".to_string(),
        ));
    }
    if graphgen.jar.as_os_str().is_empty() {
        return Err(LaunchError::ConfigError(
            "[graphgen].jar must not be empty".to_string(),
        ));
    }
    Ok(())
}
