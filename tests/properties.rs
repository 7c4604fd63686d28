use notemark::{Block, escape, markdown_to_html, parse};
use proptest::prelude::*;

/// Note-like text: markdown punctuation, HTML metacharacters, newlines.
fn note_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("*".to_string()),
            Just("**".to_string()),
            Just("`".to_string()),
            Just("```".to_string()),
            Just("[".to_string()),
            Just("](".to_string()),
            Just(")".to_string()),
            Just("# ".to_string()),
            Just("- ".to_string()),
            Just("1. ".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("<script>".to_string()),
            Just("javascript:alert(1)".to_string()),
            Just("&".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            "[a-z ]{1,6}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

/// Strip every tag the renderer is allowed to emit. Whatever is left
/// must contain no markup at all.
fn strip_known_tags(html: &str) -> String {
    const TAGS: &[&str] = &[
        "<p>", "</p>", "<br/>", "<strong>", "</strong>", "<em>", "</em>", "<code>", "</code>",
        "<pre>", "</pre>", "<ul>", "</ul>", "<ol>", "</ol>", "<li>", "</li>", "</a>",
        "<h1>", "</h1>", "<h2>", "</h2>", "<h3>", "</h3>", "<h4>", "</h4>", "<h5>", "</h5>",
        "<h6>", "</h6>",
    ];
    let mut out = html.to_string();
    for tag in TAGS {
        out = out.replace(tag, "");
    }
    // Anchor open tags carry an attribute, drop them whole
    while let Some(start) = out.find("<a href=\"") {
        let end = out[start..]
            .find('>')
            .map_or(out.len(), |i| start + i + 1);
        out.replace_range(start..end, "");
    }
    out
}

proptest! {
    #[test]
    fn output_never_contains_raw_markup(note in note_text()) {
        let html = markdown_to_html(note.as_str());
        prop_assert!(!html.contains("<script"));
        let rest = strip_known_tags(&html);
        prop_assert!(!rest.contains('<'), "stray markup in {:?}", html);
        prop_assert!(!rest.contains('>'), "stray markup in {:?}", html);
        prop_assert!(!rest.contains('"'), "stray quote in {:?}", html);
        prop_assert!(!rest.contains('\''), "stray quote in {:?}", html);
    }

    #[test]
    fn link_targets_are_allowlisted(note in note_text()) {
        let html = markdown_to_html(note.as_str());
        for (i, _) in html.match_indices("href=\"") {
            let href = &html[i + 6..];
            prop_assert!(
                ["#", "/", "http://", "https://", "mailto:"]
                    .iter()
                    .any(|p| href.to_lowercase().starts_with(p)),
                "unexpected href in {:?}", html
            );
        }
    }

    #[test]
    fn plain_text_renders_as_one_escaped_paragraph(text in "[a-zA-Z0-9 <>&\"',;:!?]{1,60}") {
        prop_assume!(!text.trim().is_empty());
        prop_assert_eq!(markdown_to_html(text.as_str()), format!("<p>{}</p>", escape(&text)));
    }

    #[test]
    fn escaped_text_is_escaped_exactly_once(text in "[a-z<>&\"' ]{1,40}") {
        prop_assume!(!text.trim().is_empty());
        let escaped = escape(&text);
        prop_assert_eq!(markdown_to_html(text.as_str()), format!("<p>{escaped}</p>"));
        prop_assert_eq!(
            markdown_to_html(escaped.as_str()),
            format!("<p>{}</p>", escape(&escaped))
        );
    }

    #[test]
    fn unterminated_fence_keeps_following_lines(
        lines in prop::collection::vec("[a-z#*\\- ]{0,10}", 0..8)
    ) {
        prop_assume!(lines.iter().all(|l| !l.trim().starts_with("```")));
        let note = format!("intro\n```\n{}", lines.join("\n"));
        let blocks = parse(&note);
        match blocks.last() {
            Some(Block::CodeBlock { lines: code, .. }) => {
                let expected = if lines.is_empty() { vec![String::new()] } else { lines.clone() };
                prop_assert_eq!(code, &expected);
            }
            other => prop_assert!(false, "expected code block, got {:?}", other),
        }
    }
}
