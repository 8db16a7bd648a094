//! Report generation for rendered upload results
//!
//! - **HTML**: a standalone copy of the upload result page with every region
//!   filled in
//! - **JSON**: the region map plus metadata, for other tools to embed
//! - **Fragments**: one `<div id="…">` per region, for pasting into an
//!   existing page
//!
//! # Usage
//!
//! ```ignore
//! use sdmx_filter_ui::report;
//!
//! // Picks the format from the extension
//! report::generate("result.html", &regions, &meta)?;
//! report::generate("result.json", &regions, &meta)?;
//! report::generate("result.txt", &regions, &meta)?;  // fragments
//! ```

pub mod fragments;
pub mod html;
pub mod json;

use crate::error::{Error, Result};
use crate::render::RenderedRegions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Fragments,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => ReportFormat::Html,
            "json" => ReportFormat::Json,
            _ => ReportFormat::Fragments,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Fragments => "txt",
        }
    }

    pub fn write<W: Write>(
        self,
        writer: &mut W,
        regions: &RenderedRegions,
        meta: &ReportMeta,
    ) -> io::Result<()> {
        match self {
            ReportFormat::Html => html::write(writer, regions, meta),
            ReportFormat::Json => json::write(writer, regions, meta),
            ReportFormat::Fragments => fragments::write(writer, regions),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Fragments => write!(f, "fragments"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "fragments" | "txt" => Ok(ReportFormat::Fragments),
            other => Err(Error::Config(format!(
                "unknown report format '{}' (expected html, json or fragments)",
                other
            ))),
        }
    }
}

/// Where a rendering came from and when it was made.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub generated: String,
    /// File name of the upload result, if it was read from disk
    pub source: Option<String>,
}

impl ReportMeta {
    pub fn now(source: Option<&Path>) -> Self {
        Self {
            generated: chrono::Local::now().to_rfc3339(),
            source: source
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
        }
    }
}

/// Generate a report in the format matching the file extension
pub fn generate<P: AsRef<Path>>(path: P, regions: &RenderedRegions, meta: &ReportMeta) -> Result<()> {
    let path = path.as_ref();
    generate_as(path, ReportFormat::from_path(path), regions, meta)
}

/// Generate a report in an explicit format, whatever the extension
pub fn generate_as(
    path: &Path,
    format: ReportFormat,
    regions: &RenderedRegions,
    meta: &ReportMeta,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    format.write(&mut file, regions, meta)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), %format, "report written");
    Ok(())
}
