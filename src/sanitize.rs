//! Output safety: HTML escaping and the link target allowlist.

use std::borrow::Cow;

/// Link targets allowed through unchanged, matched case-insensitively.
const ALLOWED_HREF_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "#", "/"];

/// Substitute for any rejected link target.
pub const FALLBACK_HREF: &str = "#";

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

/// Append `text` to `out` with `& < > " '` replaced by entities.
pub fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Return the trimmed href if it uses an allowed scheme or is a local
/// reference, otherwise [`FALLBACK_HREF`].
///
/// Anything not on the allowlist is rejected, so `javascript:`, `data:`
/// and schemes that don't exist yet all end up as `#`. The result still
/// needs attribute escaping.
pub fn sanitize_href(href: &str) -> Cow<'_, str> {
    let trimmed = href.trim();
    let lower = trimmed.to_lowercase();

    if ALLOWED_HREF_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        Cow::Borrowed(trimmed)
    } else {
        log::trace!("rejected link target with disallowed scheme");
        Cow::Borrowed(FALLBACK_HREF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn escapes_all_special_chars() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape("plain text, 100% ok"), "plain text, 100% ok");
        assert_eq!(escape("日本語"), "日本語");
    }

    #[test]
    fn escape_is_not_idempotent_on_entities() {
        // Input is plain text, so an entity in it is literal text
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[rstest]
    #[case("https://example.com", "https://example.com")]
    #[case("http://example.com/a?b=c", "http://example.com/a?b=c")]
    #[case("HTTPS://EXAMPLE.COM", "HTTPS://EXAMPLE.COM")]
    #[case("mailto:me@example.com", "mailto:me@example.com")]
    #[case("#section", "#section")]
    #[case("/notes/1", "/notes/1")]
    #[case("  https://padded.example  ", "https://padded.example")]
    #[case("javascript:alert(1)", "#")]
    #[case("JavaScript:alert(1)", "#")]
    #[case("  javascript:alert(1)", "#")]
    #[case("data:text/html;base64,PHNjcmlwdD4=", "#")]
    #[case("vbscript:msgbox", "#")]
    #[case("ftp://example.com", "#")]
    #[case("example.com", "#")]
    #[case("", "#")]
    fn href_allowlist(#[case] href: &str, #[case] expected: &str) {
        assert_eq!(sanitize_href(href), expected);
    }
}
