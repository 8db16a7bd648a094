//! Raw region fragments, one container per line

use crate::render::RenderedRegions;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, regions: &RenderedRegions) -> io::Result<()> {
    for (region, html) in regions.iter() {
        writeln!(writer, "<div id=\"{}\">{}</div>", region.id(), html)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Schema, SchemaHint, UploadResult};

    #[test]
    fn test_one_line_per_region() {
        let result = UploadResult::from_json(r#"{"removed": 2, "total": 2}"#, SchemaHint::Auto, Schema::Removals)
            .unwrap();
        let mut out = Vec::new();
        write(&mut out, &crate::render(&result)).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<div id=\"info\"></div>\n\
             <div id=\"download\"></div>\n\
             <div id=\"summary\"></div>\n\
             <div id=\"messages\"></div>\n"
        );
    }
}
