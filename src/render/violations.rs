//! Regions for the two-category (DSD / content) response.

use super::fragments::message_list;
use crate::result::ViolationCounts;

const CONTENT_HEADING: &str = "Content violations (must be fixed):";
const DSD_HEADING: &str = "DSD violations (automatically removed):";

pub(super) fn summary(v: &ViolationCounts) -> String {
    if v.dsd_violations == 0 && v.content_violations == 0 {
        return String::new();
    }

    let mut html = String::from("<h2>Results:</h2>");
    if v.dsd_violations > 0 {
        html.push_str(&format!(
            "<p>{} series keys had DSD violations (out of {}) and were removed.</p>",
            v.dsd_violations, v.total
        ));
    }
    if v.content_violations > 0 {
        html.push_str(&format!(
            "<p>Of the remaining {} series keys, {} had content violations. \
             <em>These will need to be fixed before output can be generated.</em></p>",
            v.series, v.content_violations
        ));
    }
    html
}

pub(super) fn content_messages(v: &ViolationCounts) -> String {
    message_list(CONTENT_HEADING, &v.content_messages)
}

pub(super) fn dsd_messages(v: &ViolationCounts) -> String {
    message_list(DSD_HEADING, &v.dsd_messages)
}
