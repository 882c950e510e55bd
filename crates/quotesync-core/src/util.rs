//! Small text and clock helpers shared by the store, config and remote source

/// Longest remote response excerpt carried in an error message
pub const ERROR_EXCERPT_CHARS: usize = 180;

/// Trimmed value, or `None` for missing and blank input
pub fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Whether `value` names an http(s) endpoint with something after the scheme.
/// The scheme is matched case-insensitively.
pub fn has_http_scheme(value: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && value.len() > scheme.len()
    })
}

/// Single-line excerpt of a response body for error messages.
///
/// Whitespace runs collapse to one space; the result is capped at
/// [`ERROR_EXCERPT_CHARS`] characters.
pub fn error_excerpt(body: &str) -> String {
    let mut excerpt = String::new();
    for word in body.split_whitespace() {
        if !excerpt.is_empty() {
            excerpt.push(' ');
        }
        excerpt.push_str(word);
        if excerpt.chars().count() >= ERROR_EXCERPT_CHARS {
            break;
        }
    }
    excerpt.chars().take(ERROR_EXCERPT_CHARS).collect()
}

/// Wall-clock time in Unix milliseconds, the unit of quote ids and `updatedAt`
pub fn unix_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn non_blank_drops_missing_and_whitespace() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" \t\n".to_string())), None);
        assert_eq!(non_blank(Some("  Server ".to_string())), Some("Server".to_string()));
        assert_eq!(non_blank(Some("as-is".to_string())), Some("as-is".to_string()));
    }

    #[test]
    fn has_http_scheme_requires_scheme_and_host() {
        assert!(has_http_scheme("http://localhost:8080/quotes"));
        assert!(has_http_scheme("HTTPS://example.com"));
        assert!(!has_http_scheme("https://"));
        assert!(!has_http_scheme("ftp://example.com"));
        assert!(!has_http_scheme("example.com/posts"));
    }

    #[test]
    fn error_excerpt_flattens_and_caps_html_bodies() {
        assert_eq!(
            error_excerpt("<html>\n  <body>Bad   Gateway</body>\n</html>"),
            "<html> <body>Bad Gateway</body> </html>"
        );
        let long = "word ".repeat(200);
        assert_eq!(error_excerpt(&long).chars().count(), ERROR_EXCERPT_CHARS);
        assert_eq!(error_excerpt("   "), "");
    }

    #[test]
    fn unix_timestamp_ms_is_in_milliseconds() {
        // Any time after 2001-09-09 has 13 digits in ms.
        assert!(unix_timestamp_ms() > 1_000_000_000_000);
    }
}
