// src/types.rs

//! Small value types shared by the launcher, the config file and the CLI.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{LaunchError, Result};

/// Separator used to join path lists (`PATH`, classpaths) on this platform.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Classpath handed to the JVM through `-cp`.
///
/// - `Single`: a string that is already joined (or a single entry).
/// - `Many`: ordered entries, joined with [`PATH_LIST_SEPARATOR`].
///
/// Both forms normalize to the same string for the same content, so
/// `Many(["a", "b"])` and `Single("a:b")` are interchangeable on unix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Classpath {
    Single(String),
    Many(Vec<String>),
}

impl Classpath {
    /// Joined form passed after `-cp`.
    pub fn normalize(&self) -> String {
        match self {
            Classpath::Single(s) => s.clone(),
            Classpath::Many(entries) => {
                let sep = PATH_LIST_SEPARATOR.to_string();
                entries.join(&sep)
            }
        }
    }

    /// Reject classpaths the JVM could never make sense of.
    pub fn validate(&self) -> Result<()> {
        match self {
            Classpath::Single(s) => {
                if s.is_empty() {
                    return Err(LaunchError::ConfigError(
                        "classpath must not be empty".to_string(),
                    ));
                }
                ensure_no_nul("classpath", s)
            }
            Classpath::Many(entries) => {
                if entries.is_empty() {
                    return Err(LaunchError::ConfigError(
                        "classpath list must contain at least one entry".to_string(),
                    ));
                }
                for (idx, entry) in entries.iter().enumerate() {
                    if entry.is_empty() {
                        return Err(LaunchError::ConfigError(format!(
                            "classpath entry #{idx} is empty"
                        )));
                    }
                    ensure_no_nul("classpath entry", entry)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Classpath {
    fn from(s: &str) -> Self {
        Classpath::Single(s.to_string())
    }
}

impl From<String> for Classpath {
    fn from(s: String) -> Self {
        Classpath::Single(s)
    }
}

impl From<Vec<String>> for Classpath {
    fn from(entries: Vec<String>) -> Self {
        Classpath::Many(entries)
    }
}

impl From<&[&str]> for Classpath {
    fn from(entries: &[&str]) -> Self {
        Classpath::Many(entries.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Classpath {
    fn from(entries: [&str; N]) -> Self {
        Classpath::Many(entries.iter().map(|s| s.to_string()).collect())
    }
}

/// Global JVM options, either as one shell-like line or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JavaOptions {
    /// Split on whitespace, e.g. `"-Xmx10G -Xss4m"`.
    Line(String),
    /// Taken verbatim.
    List(Vec<String>),
}

impl JavaOptions {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            JavaOptions::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            JavaOptions::List(list) => list.clone(),
        }
    }
}

impl From<&str> for JavaOptions {
    fn from(s: &str) -> Self {
        JavaOptions::Line(s.to_string())
    }
}

impl From<Vec<String>> for JavaOptions {
    fn from(list: Vec<String>) -> Self {
        JavaOptions::List(list)
    }
}

/// Graph serialization formats understood by GraphGen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    #[default]
    Gml,
    GraphMl,
}

impl SerializationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializationFormat::Gml => "gml",
            SerializationFormat::GraphMl => "graphml",
        }
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SerializationFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gml" => Ok(SerializationFormat::Gml),
            "graphml" => Ok(SerializationFormat::GraphMl),
            other => Err(format!(
                "invalid serialization format: {other} (expected \"gml\" or \"graphml\")"
            )),
        }
    }
}

/// Parse a duration string such as `"500ms"`, `"30s"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => scaled_secs(value, 60),
        "h" => scaled_secs(value, 60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}

fn scaled_secs(value: u64, factor: u64) -> std::result::Result<Duration, String> {
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration out of range: {value} x {factor}s"))
}

/// [`parse_duration`] that also rejects zero, for deadlines.
pub fn parse_timeout(s: &str) -> std::result::Result<Duration, String> {
    let timeout = parse_duration(s)?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

pub(crate) fn ensure_no_nul(what: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(LaunchError::ConfigError(format!(
            "{what} contains a NUL byte: {value:?}"
        )));
    }
    Ok(())
}
