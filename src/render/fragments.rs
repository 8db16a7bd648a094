//! Markup shared by both response shapes.

pub(super) const DOWNLOAD_LABEL: &str = "Download filtered SDMX data";

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The service writes `info` as markup, so it goes in untouched.
pub(super) fn info(info: Option<&str>) -> String {
    info.unwrap_or_default().to_string()
}

pub(super) fn download(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => format!(
            r#"<a class="button" href="{}">{}</a>"#,
            escape_html(url),
            DOWNLOAD_LABEL
        ),
        _ => String::new(),
    }
}

/// `<h2>` heading plus an ordered list, or nothing for an empty list.
///
/// Messages are plain text and are always escaped, unlike `info`. They quote
/// user-supplied codes, so a `<` in a message must show as `<` and never
/// open a tag. See the escaping decision in DESIGN.md before changing this.
pub(super) fn message_list(heading: &str, messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let mut html = format!("<h2>{}</h2><ol>", heading);
    for message in messages {
        html.push_str("<li>");
        html.push_str(&escape_html(message));
        html.push_str("</li>");
    }
    html.push_str("</ol>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_download_url_is_attribute_escaped() {
        let html = download(Some(r#"/uploads/x.xml" onclick="alert(1)"#));
        assert!(html.contains(r#"href="/uploads/x.xml&quot; onclick=&quot;alert(1)""#));
    }

    #[test]
    fn test_download_empty_string_renders_nothing() {
        assert_eq!(download(Some("")), "");
        assert_eq!(download(None), "");
    }

    #[test]
    fn test_message_list_empty() {
        assert_eq!(message_list("Anything:", &[]), "");
    }

    #[test]
    fn test_message_list_keeps_order() {
        let messages = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        assert_eq!(
            message_list("Reasons:", &messages),
            "<h2>Reasons:</h2><ol><li>3</li><li>1</li><li>2</li></ol>"
        );
    }

    #[test]
    fn test_message_markup_shown_as_text() {
        let messages = vec!["Code <b>XX</b> is not in \"CL_AREA\"".to_string()];
        assert_eq!(
            message_list("Reasons:", &messages),
            "<h2>Reasons:</h2><ol><li>Code &lt;b&gt;XX&lt;/b&gt; is not in &quot;CL_AREA&quot;</li></ol>"
        );
        assert_eq!(info(Some("<b>kept</b>")), "<b>kept</b>");
    }
}
