//! TOML configuration
//!
//! Every field has a default, so a missing file, an empty file, or a file
//! with only some sections all load. Command-line flags are applied on top
//! by the binary.
//!
//! ```toml
//! schema = "auto"
//! fallback = "removals"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! open_browser = true
//!
//! [report]
//! dir = "sdmx-filter-reports"
//! format = "html"
//!
//! [logging]
//! level = "info"
//! ```

use crate::error::{Error, Result};
use crate::report::ReportFormat;
use crate::result::{Schema, SchemaHint};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "sdmx-filter-ui.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Response shape this deployment's filter service sends.
    pub schema: SchemaHint,
    /// Shape assumed by `auto` when a payload has no shape-specific field.
    pub fallback: Schema,
    pub server: ServerConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: SchemaHint::Auto,
            fallback: Schema::Removals,
            server: ServerConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            open_browser: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub dir: PathBuf,
    pub format: ReportFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("sdmx-filter-reports"),
            format: ReportFormat::Html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Load `path` if given (it must exist), otherwise `sdmx-filter-ui.toml`
    /// in the working directory if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
