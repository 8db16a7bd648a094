//! Browser adapter: write rendered upload results straight into the page.
//!
//! ```js
//! import init, { success } from './sdmx_filter_ui_wasm.js';
//! await init();
//! Dropzone.options.uploadForm = { success };
//! ```

use sdmx_filter_ui::result::RawResponse;
use sdmx_filter_ui::{render, Region, RenderedRegions, Schema, SchemaHint, UploadResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// `""` and `undefined` mean auto-detect.
fn parse_hint(schema: Option<String>) -> Result<SchemaHint, String> {
    match schema.as_deref() {
        None | Some("") => Ok(SchemaHint::Auto),
        Some(s) => s.parse().map_err(|e: sdmx_filter_ui::Error| e.to_string()),
    }
}

/// Pairs of DOM id and HTML to assign. Ids of the other shape are cleared
/// too, so a page carrying both sets of containers never shows stale lists.
fn assignments(regions: &RenderedRegions) -> Vec<(&'static str, &str)> {
    Region::ALL
        .iter()
        .map(|&r| (r.id(), regions.get(r).unwrap_or("")))
        .collect()
}

fn classify(response: JsValue, hint: SchemaHint) -> Result<UploadResult, JsValue> {
    // Some upload widgets hand over the raw response text.
    if let Some(text) = response.as_string() {
        return UploadResult::from_json(&text, hint, Schema::Removals)
            .map_err(|e| JsValue::from_str(&e.to_string()));
    }

    let raw: RawResponse = serde_wasm_bindgen::from_value(response)?;
    raw.classify(hint, Schema::Removals)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a result to an `{id: html}` object without touching the DOM.
#[wasm_bindgen]
pub fn render_regions(response: JsValue, schema: Option<String>) -> Result<JsValue, JsValue> {
    let hint = parse_hint(schema).map_err(|e| JsValue::from_str(&e))?;
    let regions = render(&classify(response, hint)?);

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(regions.serialize(&serializer)?)
}

/// Render a result and write every region into its container.
#[wasm_bindgen]
pub fn apply_upload_result(response: JsValue, schema: Option<String>) -> Result<(), JsValue> {
    let hint = parse_hint(schema).map_err(|e| JsValue::from_str(&e))?;
    let regions = render(&classify(response, hint)?);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    for (id, html) in assignments(&regions) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }
    Ok(())
}

/// Upload widget success callback.
#[wasm_bindgen]
pub fn success(_file: JsValue, response: JsValue) {
    if let Err(e) = apply_upload_result(response, None) {
        web_sys::console::error_1(&e);
    }
}
