//! Turn an upload result into HTML for each region of the upload page
//!
//! The page has a fixed set of containers, addressed by DOM id:
//!
//! | Region | Id | Shape |
//! |--------|----|-------|
//! | [`Region::Info`] | `info` | both |
//! | [`Region::Download`] | `download` | both |
//! | [`Region::Summary`] | `summary` | both |
//! | [`Region::ContentMessages`] | `content-messages` | violations |
//! | [`Region::DsdMessages`] | `dsd-messages` | violations |
//! | [`Region::Messages`] | `messages` | removals |
//!
//! [`render`] is pure: it returns every region of the result's shape, empty
//! regions included, so an adapter that writes them all replaces whatever a
//! previous upload left behind.
//!
//! ```
//! use sdmx_filter_ui::{render, Region, Schema, SchemaHint, UploadResult};
//!
//! let json = r#"{"removed": 1, "total": 5, "messages": ["x"]}"#;
//! let result = UploadResult::from_json(json, SchemaHint::Auto, Schema::Removals).unwrap();
//! let regions = render(&result);
//!
//! assert_eq!(regions.get(Region::Summary), Some("<p>1 series keys were removed (out of 5).</p>"));
//! ```

mod fragments;
mod removals;
mod violations;

pub use fragments::escape_html;

use crate::result::{Outcome, Schema, UploadResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A named container on the upload page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Info,
    Download,
    Summary,
    ContentMessages,
    DsdMessages,
    Messages,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Info,
        Region::Download,
        Region::Summary,
        Region::ContentMessages,
        Region::DsdMessages,
        Region::Messages,
    ];

    /// DOM id of the container.
    pub fn id(self) -> &'static str {
        match self {
            Region::Info => "info",
            Region::Download => "download",
            Region::Summary => "summary",
            Region::ContentMessages => "content-messages",
            Region::DsdMessages => "dsd-messages",
            Region::Messages => "messages",
        }
    }

    pub fn from_id(id: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.id() == id)
    }

    /// Regions a result of the given shape fills, in page order.
    pub fn for_schema(schema: Schema) -> &'static [Region] {
        match schema {
            Schema::Violations => &[
                Region::Info,
                Region::Download,
                Region::Summary,
                Region::ContentMessages,
                Region::DsdMessages,
            ],
            Schema::Removals => &[
                Region::Info,
                Region::Download,
                Region::Summary,
                Region::Messages,
            ],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// HTML for each region, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRegions {
    schema: Schema,
    regions: Vec<(Region, String)>,
}

impl RenderedRegions {
    /// An all-empty rendering for the given shape.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            regions: Region::for_schema(schema)
                .iter()
                .map(|&r| (r, String::new()))
                .collect(),
        }
    }

    fn set(&mut self, region: Region, html: String) {
        if let Some(slot) = self.regions.iter_mut().find(|(r, _)| *r == region) {
            slot.1 = html;
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// HTML for `region`, or `None` if the region is not part of this shape.
    pub fn get(&self, region: Region) -> Option<&str> {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, html)| html.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &str)> {
        self.regions.iter().map(|(r, html)| (*r, html.as_str()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// True when every region renders to nothing.
    pub fn is_blank(&self) -> bool {
        self.regions.iter().all(|(_, html)| html.is_empty())
    }
}

// Serialized as a plain `{id: html}` object so the page script can apply it
// without knowing the shape.
impl Serialize for RenderedRegions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for (region, html) in &self.regions {
            map.serialize_entry(region.id(), html)?;
        }
        map.end()
    }
}

/// Render an upload result into page regions.
pub fn render(result: &UploadResult) -> RenderedRegions {
    let mut out = RenderedRegions::empty(result.schema());

    out.set(Region::Info, fragments::info(result.info.as_deref()));
    out.set(Region::Download, fragments::download(result.download.as_deref()));

    match &result.outcome {
        Outcome::Violations(v) => {
            out.set(Region::Summary, violations::summary(v));
            out.set(Region::ContentMessages, violations::content_messages(v));
            out.set(Region::DsdMessages, violations::dsd_messages(v));
        }
        Outcome::Removals(r) => {
            out.set(Region::Summary, removals::summary(r));
            out.set(Region::Messages, removals::messages(r));
        }
    }

    tracing::debug!(
        schema = %out.schema(),
        blank = out.is_blank(),
        "rendered upload result"
    );
    out
}
