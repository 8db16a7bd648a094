//! JSON report output

use super::ReportMeta;
use crate::render::RenderedRegions;
use crate::result::Schema;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: &'a str,
    source: Option<&'a str>,
    schema: Schema,
    regions: &'a RenderedRegions,
}

pub fn write<W: Write>(writer: &mut W, regions: &RenderedRegions, meta: &ReportMeta) -> io::Result<()> {
    let report = JsonReport {
        generated: &meta.generated,
        source: meta.source.as_deref(),
        schema: regions.schema(),
        regions,
    };

    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}
