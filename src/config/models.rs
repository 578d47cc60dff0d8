use serde::{Deserialize, Serialize};

use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub vertex: VertexConfig,

    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    /// When unset, logs go to stderr.
    #[serde(default)]
    pub file: Option<LogFile>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct VertexConfig {
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default = "location")]
    pub location: String,

    /// Regional endpoint override, mainly for tests.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u16>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PromptConfig {
    /// Preamble line naming the database flavor and version, e.g.
    /// "The database is MySQL 8.0.".
    #[serde(default)]
    pub database_version: Option<String>,

    #[serde(default = "quote_start")]
    pub quote_start: String,

    #[serde(default = "quote_end")]
    pub quote_end: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            vertex: VertexConfig::default(),
            prompt: PromptConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: log_level(),
            filters: None,
            file: None,
        }
    }
}

impl Default for VertexConfig {
    fn default() -> Self {
        Self {
            model: None,
            location: location(),
            endpoint: None,
            timeout_secs: None,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            database_version: None,
            quote_start: quote_start(),
            quote_end: quote_end(),
        }
    }
}
