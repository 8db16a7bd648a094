//! sdmx-filter-ui - Show the outcome of an SDMX global filter upload
//!
//! The SDG SDMX global filter takes a national SDMX data file, removes the
//! series keys that do not fit the global Data Structure Definition (DSD),
//! and reports what happened as a small JSON object. This crate turns that
//! object into the HTML shown on the upload page.
//!
//! # Overview
//!
//! The page has a handful of named regions (`info`, `download`, `summary`
//! and one or two message lists). Rendering is a pure function from an
//! [`UploadResult`] to [`RenderedRegions`]; writing the regions somewhere is
//! left to an adapter:
//!
//! - the `serve` subcommand hosts the page and renders posted results;
//! - the `render` subcommand writes reports for saved results;
//! - the `wasm-renderer` crate writes straight into the browser DOM.
//!
//! # Response shapes
//!
//! | Shape | Fields | Message regions |
//! |-------|--------|-----------------|
//! | violations | `dsd_violations`, `content_violations`, `total`, `series` | `content-messages`, `dsd-messages` |
//! | removals | `removed`, `total` | `messages` |
//!
//! # Quick Start
//!
//! ```
//! use sdmx_filter_ui::{render, Region, Schema, SchemaHint, UploadResult};
//!
//! let json = r#"{"dsd_violations": 3, "content_violations": 0, "total": 10, "series": 7}"#;
//! let result = UploadResult::from_json(json, SchemaHint::Auto, Schema::Removals)?;
//! let regions = render(&result);
//!
//! for (region, html) in regions.iter() {
//!     println!("#{}: {}", region, html);
//! }
//! assert!(regions
//!     .get(Region::Summary)
//!     .unwrap()
//!     .contains("3 series keys had DSD violations (out of 10) and were removed."));
//! # Ok::<(), sdmx_filter_ui::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`result`]: response shapes and schema detection
//! - [`render`](mod@render): region rendering
//! - `report`: HTML, JSON and fragment output files
//! - `batch`, `serve`: CLI and HTTP adapters

pub mod error;
pub mod render;
pub mod result;

#[cfg(feature = "cli")]
pub mod batch;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "cli")]
pub mod report;
#[cfg(feature = "cli")]
pub mod serve;

pub use error::{Error, Result};
pub use render::{render, Region, RenderedRegions};
pub use result::{Outcome, RemovalCounts, Schema, SchemaHint, UploadResult, ViolationCounts};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is reachable from the crate
    // root.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        let _: SchemaHint = SchemaHint::default();
        let _: Schema = Schema::Removals;
        let _ = RenderedRegions::empty(Schema::Violations);
    }

    #[test]
    fn test_render_accessible() {
        let result = UploadResult {
            info: None,
            download: None,
            outcome: Outcome::Removals(RemovalCounts::default()),
        };
        let regions = render(&result);
        assert!(regions.is_blank());
        assert_eq!(regions.len(), 4);
    }

    #[test]
    fn test_default_hint_is_auto() {
        assert_eq!(SchemaHint::default(), SchemaHint::Auto);
    }
}
