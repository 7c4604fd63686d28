//! Toolbar edits for the note editor.
//!
//! Offsets are char indices, matching what a plain-text editing surface
//! reports. Every edit is checked against a length cap and leaves the
//! note untouched when the result would be too long.

use std::ops::Range;

use crate::error::{Error, Result};

/// Markup inserted around a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    pub before: &'static str,
    pub after: &'static str,
    /// Inserted when nothing is selected
    pub placeholder: &'static str,
}

impl Wrap {
    pub const BOLD: Wrap = Wrap {
        before: "**",
        after: "**",
        placeholder: "bold text",
    };
    pub const ITALIC: Wrap = Wrap {
        before: "*",
        after: "*",
        placeholder: "italic text",
    };
    pub const LIST_ITEM: Wrap = Wrap {
        before: "- ",
        after: "",
        placeholder: "list item",
    };
    pub const LINK: Wrap = Wrap {
        before: "[",
        after: "](https://example.com)",
        placeholder: "link text",
    };
    pub const CODE_BLOCK: Wrap = Wrap {
        before: "```\n",
        after: "\n```",
        placeholder: "code",
    };
}

/// The edited note and where the selection ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Range<usize>,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of char index `pos`, clamped to the end of `text`.
fn byte_offset(text: &str, pos: usize) -> usize {
    text.char_indices().nth(pos).map_or(text.len(), |(i, _)| i)
}

fn check_len(text: String, max_chars: usize) -> Result<String> {
    let len = char_len(&text);
    if len > max_chars {
        return Err(Error::NoteTooLong {
            len,
            max: max_chars,
        });
    }
    Ok(text)
}

/// Surround the selected text with `wrap`, or insert the placeholder when
/// the selection is empty. The new selection covers the wrapped text.
pub fn wrap_selection(
    text: &str,
    selection: Range<usize>,
    wrap: Wrap,
    max_chars: usize,
) -> Result<Edit> {
    let len = char_len(text);
    let end = selection.end.min(len);
    let start = selection.start.min(end);

    let (start_byte, end_byte) = (byte_offset(text, start), byte_offset(text, end));
    let inner = match &text[start_byte..end_byte] {
        "" => wrap.placeholder,
        selected => selected,
    };

    let mut edited =
        String::with_capacity(text.len() + wrap.before.len() + inner.len() + wrap.after.len());
    edited.push_str(&text[..start_byte]);
    edited.push_str(wrap.before);
    edited.push_str(inner);
    edited.push_str(wrap.after);
    edited.push_str(&text[end_byte..]);

    let selection_start = start + char_len(wrap.before);
    Ok(Edit {
        text: check_len(edited, max_chars)?,
        selection: selection_start..selection_start + char_len(inner),
    })
}

/// Turn the line holding `caret` into a heading of `level` (clamped to 1..=6)
/// by inserting `#` marks at its start. The caret moves with the text.
pub fn prefix_heading(text: &str, caret: usize, level: u8, max_chars: usize) -> Result<Edit> {
    let caret = caret.min(char_len(text));
    let caret_byte = byte_offset(text, caret);
    let line_start = text[..caret_byte].rfind('\n').map_or(0, |i| i + 1);

    let prefix = format!("{} ", "#".repeat(usize::from(level.clamp(1, 6))));
    let mut edited = String::with_capacity(text.len() + prefix.len());
    edited.push_str(&text[..line_start]);
    edited.push_str(&prefix);
    edited.push_str(&text[line_start..]);

    let caret = caret + char_len(&prefix);
    Ok(Edit {
        text: check_len(edited, max_chars)?,
        selection: caret..caret,
    })
}
