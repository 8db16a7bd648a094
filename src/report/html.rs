//! Standalone HTML copy of the upload result page

use super::ReportMeta;
use crate::render::{escape_html, RenderedRegions};
use std::io::{self, Write};

pub const PAGE_TITLE: &str = "SDG SDMX global filter";

pub fn write<W: Write>(writer: &mut W, regions: &RenderedRegions, meta: &ReportMeta) -> io::Result<()> {
    let mut body = String::new();
    for (region, html) in regions.iter() {
        body.push_str(&format!(
            "        <div id=\"{id}\" class=\"region\">{html}</div>\n",
            id = region.id(),
            html = html
        ));
    }

    let source = meta
        .source
        .as_deref()
        .map(|s| format!("{} &middot; ", escape_html(s)))
        .unwrap_or_default();

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            color: #1f2328;
            line-height: 1.5;
        }}
        .container {{ max-width: 960px; margin: 0 auto; padding: 2rem; }}
        h1 {{ border-bottom: 1px solid #d0d7de; padding-bottom: 0.5rem; }}
        .region:empty {{ display: none; }}
        a.button {{
            display: inline-block;
            padding: 0.5rem 1rem;
            border-radius: 6px;
            background: #1f883d;
            color: #fff;
            text-decoration: none;
            font-weight: 600;
        }}
        ol li {{ margin-bottom: 0.25rem; }}
        footer {{ color: #656d76; font-size: 0.875rem; margin-top: 2rem; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
{body}        <footer>{source}{schema} response &middot; generated {generated}</footer>
    </div>
</body>
</html>
"#,
        title = PAGE_TITLE,
        body = body,
        source = source,
        schema = regions.schema(),
        generated = escape_html(&meta.generated),
    )?;

    Ok(())
}
