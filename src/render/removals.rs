//! Regions for the single-category (removed / total) response.

use super::fragments::message_list;
use crate::result::RemovalCounts;

const REASONS_HEADING: &str = "Reasons for removals:";

/// Only a partial removal gets a sentence.
pub(super) fn summary(r: &RemovalCounts) -> String {
    if r.removed < r.total {
        format!("<p>{} series keys were removed (out of {}).</p>", r.removed, r.total)
    } else {
        String::new()
    }
}

pub(super) fn messages(r: &RemovalCounts) -> String {
    message_list(REASONS_HEADING, &r.messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_removed_still_reports() {
        let r = RemovalCounts { removed: 0, total: 5, messages: vec![] };
        assert_eq!(summary(&r), "<p>0 series keys were removed (out of 5).</p>");
    }

    #[test]
    fn test_more_removed_than_total_is_silent() {
        let r = RemovalCounts { removed: 6, total: 5, messages: vec![] };
        assert_eq!(summary(&r), "");
    }

    #[test]
    fn test_reasons_are_escaped() {
        let r = RemovalCounts {
            removed: 1,
            total: 2,
            messages: vec!["<script>".to_string()],
        };
        assert_eq!(
            messages(&r),
            "<h2>Reasons for removals:</h2><ol><li>&lt;script&gt;</li></ol>"
        );
    }
}
