//! Render many saved upload results at once
//!
//! `sdmx-filter-ui render ./responses/` → one report per `*.json` file

use crate::error::Result;
use crate::render::render;
use crate::report::{self, ReportFormat, ReportMeta};
use crate::result::{Schema, SchemaHint, UploadResult};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub schema: SchemaHint,
    pub fallback: Schema,
    pub format: ReportFormat,
    /// The path inputs were collected from; reports mirror layout below it
    pub root: PathBuf,
    pub report_dir: PathBuf,
    pub progress: bool,
}

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Report path and the shape that was rendered, or the error message
    pub result: std::result::Result<(PathBuf, Schema), String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub rendered: usize,
    pub failed: usize,
    pub violations: usize,
    pub removals: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Self { total: outcomes.len(), ..Default::default() };

        for o in outcomes {
            match &o.result {
                Ok((_, Schema::Violations)) => {
                    summary.rendered += 1;
                    summary.violations += 1;
                }
                Ok((_, Schema::Removals)) => {
                    summary.rendered += 1;
                    summary.removals += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }

        summary
    }
}

/// A single file as-is, or every `*.json` under a directory, sorted.
pub fn collect_inputs(path: &Path) -> Vec<PathBuf> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    } else if path.exists() {
        vec![path.to_path_buf()]
    } else {
        vec![]
    }
}

/// Report path for an input: its path below `root`, moved under
/// `report_dir` with the format's extension.
///
/// `responses/jan/upload.json` under root `responses` becomes
/// `{report_dir}/jan/upload.{ext}`. An input outside `root` (or `root`
/// itself, for a single file) keeps only its file name.
pub fn report_path(input: &Path, root: &Path, report_dir: &Path, format: ReportFormat) -> PathBuf {
    let relative = match input.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("result")),
    };
    report_dir.join(relative).with_extension(format.extension())
}

/// Report path per input, or an error for inputs whose report would
/// overwrite another input's report or an input file.
fn plan_outputs(files: &[PathBuf], opts: &BatchOptions) -> Vec<std::result::Result<PathBuf, String>> {
    let outputs: Vec<PathBuf> = files
        .iter()
        .map(|input| report_path(input, &opts.root, &opts.report_dir, opts.format))
        .collect();

    let mut claims: HashMap<&Path, usize> = HashMap::new();
    for output in &outputs {
        *claims.entry(output.as_path()).or_insert(0) += 1;
    }

    outputs
        .iter()
        .map(|output| {
            if claims.get(output.as_path()).copied().unwrap_or(0) > 1 {
                Err(format!("report path {} is shared with another input", output.display()))
            } else if files.contains(output) {
                Err(format!("report path {} would overwrite an input", output.display()))
            } else {
                Ok(output.clone())
            }
        })
        .collect()
}

/// Parse, render and write one result file.
pub fn render_file(input: &Path, output: &Path, opts: &BatchOptions) -> Result<Schema> {
    let bytes = std::fs::read(input)?;
    let result = UploadResult::from_slice(&bytes, opts.schema, opts.fallback)?;
    let regions = render(&result);
    report::generate_as(output, opts.format, &regions, &ReportMeta::now(Some(input)))?;
    Ok(regions.schema())
}

pub fn run(files: &[PathBuf], opts: &BatchOptions) -> Vec<FileOutcome> {
    let pb = if opts.progress && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    tracing::info!(files = files.len(), dir = %opts.report_dir.display(), "rendering batch");

    let planned = plan_outputs(files, opts);

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .zip(planned.into_par_iter())
        .map(|(input, output)| {
            let result = output.and_then(|output| {
                render_file(input, &output, opts)
                    .map(|schema| (output, schema))
                    .map_err(|e| e.to_string())
            });
            if let Err(ref e) = result {
                tracing::warn!(file = %input.display(), error = %e, "failed to render");
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(
                    input
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                );
            }

            FileOutcome { input: input.clone(), result }
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    outcomes
}
