use std::sync::LazyLock;

use regex::Regex;

static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static MARKUP_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#>*_`~-]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ELLIPSIS: char = '…';

/// One-line plain-text summary of a note, for note lists.
///
/// Fenced code is dropped, links keep only their label, markup characters
/// become spaces and whitespace is collapsed. Results longer than
/// `max_chars` are cut and end with an ellipsis.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let text = FENCED_CODE.replace_all(content, " ");
    let text = LINK.replace_all(&text, "$1");
    let text = MARKUP_CHAR.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut short = text[..cut].to_string();
            short.push(ELLIPSIS);
            short
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("# Title\n\nSome **bold** text", "Title Some bold text")]
    #[case("see [the plan](https://e.com/p) now", "see the plan now")]
    #[case("before\n```\nlet x = 1;\n```\nafter", "before after")]
    #[case("- one\n- two\n> quote", "one two quote")]
    #[case("snake_case ~~gone~~", "snake case gone")]
    #[case("```\nunterminated", "unterminated")]
    fn strips_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(excerpt(input, 60), expected);
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(excerpt("abcdef", 3), "abc…");
        assert_eq!(excerpt("abc", 3), "abc");
        assert_eq!(excerpt("日本語のノート", 2), "日本…");
    }

    #[test]
    fn counts_chars_after_collapsing() {
        let long = "word ".repeat(20);
        let short = excerpt(&long, 60);
        assert_eq!(short.chars().count(), 61);
        assert!(short.ends_with('…'));
    }
}
