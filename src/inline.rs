//! Inline formatting: code spans, links, bold and italic.
//!
//! Text is first lexed into atoms, where a complete code span is a single
//! opaque atom and line breaks are explicit. A recursive scanner then
//! builds [`Span`] trees with fixed precedence: links bind tighter than
//! bold, bold tighter than italic. A closer is only searched for at the
//! opener's own nesting level, skipping complete higher-precedence
//! constructs, so the rendered markup is always properly nested.
//!
//! Unmatched delimiters stay in the output as literal text.

use crate::block::Span;
use crate::sanitize::{escape_into, sanitize_href};

/// Parse a single string. `\n` becomes a [`Span::LineBreak`].
pub fn parse_inlines(text: &str) -> Vec<Span> {
    Scanner::new(lex(text.split('\n'))).parse()
}

/// Parse consecutive lines, separated by [`Span::LineBreak`].
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Span> {
    Scanner::new(lex(lines.iter().map(|line| line.as_ref()))).parse()
}

/// Parse and render a single string to HTML.
pub fn format_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    write_spans(&parse_inlines(text), &mut out);
    out
}

/// Render spans as HTML.
pub fn write_spans(spans: &[Span], out: &mut String) {
    for span in spans {
        write_span(span, out);
    }
}

fn write_span(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => escape_into(text, out),
        Span::Code(code) => {
            out.push_str("<code>");
            escape_into(code, out);
            out.push_str("</code>");
        }
        Span::Link { href, content } => {
            out.push_str("<a href=\"");
            escape_into(&sanitize_href(href), out);
            out.push_str("\" target=\"_blank\" rel=\"noreferrer noopener\">");
            write_spans(content, out);
            out.push_str("</a>");
        }
        Span::Bold(inner) => {
            out.push_str("<strong>");
            write_spans(inner, out);
            out.push_str("</strong>");
        }
        Span::Italic(inner) => {
            out.push_str("<em>");
            write_spans(inner, out);
            out.push_str("</em>");
        }
        Span::LineBreak => out.push_str("<br/>"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Atom {
    Char(char),
    Code(String),
    Break,
}

fn lex<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<Atom> {
    let mut atoms = Vec::new();
    for (n, line) in lines.enumerate() {
        if n > 0 {
            atoms.push(Atom::Break);
        }
        lex_line(line, &mut atoms);
    }
    atoms
}

/// A code span is a backtick, at least one non-backtick char, and a
/// backtick, all on one line.
fn lex_line(line: &str, atoms: &mut Vec<Atom>) {
    let mut rest = line;
    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                atoms.extend(rest[..open].chars().map(Atom::Char));
                atoms.push(Atom::Code(after[..close].to_string()));
                rest = &after[close + 1..];
            }
            _ => {
                atoms.extend(rest[..=open].chars().map(Atom::Char));
                rest = after;
            }
        }
    }
    atoms.extend(rest.chars().map(Atom::Char));
}

/// A complete `[label](href)` starting at some `[`
#[derive(Debug)]
struct LinkMatch {
    /// Index of the closing `]`
    label_end: usize,
    href: String,
    /// One past the closing `)`
    end: usize,
}

/// Labels and hrefs never cross a line break, so each lookup is bounded
/// by the length of its line.
fn find_link(atoms: &[Atom], open: usize) -> Option<LinkMatch> {
    let mut i = open + 1;
    loop {
        match atoms.get(i)? {
            Atom::Char(']') => break,
            Atom::Break => return None,
            _ => i += 1,
        }
    }
    let label_end = i;
    if label_end == open + 1 || atoms.get(label_end + 1) != Some(&Atom::Char('(')) {
        return None;
    }

    let mut href = String::new();
    i = label_end + 2;
    loop {
        match atoms.get(i)? {
            Atom::Char(')') => break,
            Atom::Char(c) => href.push(*c),
            Atom::Code(_) | Atom::Break => return None,
        }
        i += 1;
    }
    if href.is_empty() {
        return None;
    }

    Some(LinkMatch {
        label_end,
        href,
        end: i + 1,
    })
}

struct Scanner {
    atoms: Vec<Atom>,
    /// Link starting at each index, when one is complete
    links: Vec<Option<LinkMatch>>,
}

impl Scanner {
    fn new(atoms: Vec<Atom>) -> Self {
        let links = (0..atoms.len())
            .map(|i| match atoms[i] {
                Atom::Char('[') => find_link(&atoms, i),
                _ => None,
            })
            .collect();
        Scanner { atoms, links }
    }

    fn parse(&self) -> Vec<Span> {
        self.spans(0, self.atoms.len())
    }

    fn is_char(&self, i: usize, end: usize, c: char) -> bool {
        i < end && self.atoms[i] == Atom::Char(c)
    }

    /// A link at `i` that fits inside the current range.
    fn link_at(&self, i: usize, end: usize) -> Option<&LinkMatch> {
        self.links
            .get(i)?
            .as_ref()
            .filter(|link| link.end <= end)
    }

    fn next_index(&self, i: usize, end: usize) -> usize {
        self.link_at(i, end).map_or(i + 1, |link| link.end)
    }

    /// Index of the `**` closing a bold run opened at `open`.
    /// Non-greedy, with at least one atom of content.
    fn bold_at(&self, open: usize, end: usize) -> Option<usize> {
        if !(self.is_char(open, end, '*') && self.is_char(open + 1, end, '*')) {
            return None;
        }
        let mut i = open + 2;
        while i + 1 < end {
            if i > open + 2 && self.is_char(i, end, '*') && self.is_char(i + 1, end, '*') {
                return Some(i);
            }
            i = self.next_index(i, end);
        }
        None
    }

    /// Index of the `*` closing an italic run opened at `open`.
    ///
    /// Content is non-empty, stays on one line and holds no bare `*`
    /// (complete bold runs are skipped). The closer must not be followed
    /// by another `*`.
    fn italic_at(&self, open: usize, end: usize) -> Option<usize> {
        // Nothing inside may reach past the current line, including a
        // skipped bold run
        let line_end = (open + 1..end)
            .find(|&i| self.atoms[i] == Atom::Break)
            .unwrap_or(end);
        if self.is_char(open + 1, line_end, '*') {
            return None;
        }
        let mut i = open + 1;
        while i < line_end {
            if self.is_char(i, line_end, '*') {
                if let Some(close) = self.bold_at(i, line_end) {
                    i = close + 2;
                    continue;
                }
                return (!self.is_char(i + 1, line_end, '*')).then_some(i);
            }
            i = self.next_index(i, line_end);
        }
        None
    }

    fn spans(&self, start: usize, end: usize) -> Vec<Span> {
        let mut out = SpanBuilder::default();
        // Whether the previous atom was emitted as a literal `*`
        let mut after_star = false;
        let mut i = start;

        while i < end {
            let was_after_star = std::mem::take(&mut after_star);
            match &self.atoms[i] {
                Atom::Code(code) => {
                    out.push(Span::Code(code.clone()));
                    i += 1;
                }
                Atom::Break => {
                    out.push(Span::LineBreak);
                    i += 1;
                }
                Atom::Char('[') => match self.link_at(i, end) {
                    Some(link) => {
                        out.push(Span::Link {
                            href: link.href.clone(),
                            content: self.spans(i + 1, link.label_end),
                        });
                        i = link.end;
                    }
                    None => {
                        out.push_char('[');
                        i += 1;
                    }
                },
                Atom::Char('*') => {
                    if let Some(close) = self.bold_at(i, end) {
                        out.push(Span::Bold(self.spans(i + 2, close)));
                        i = close + 2;
                    } else if !was_after_star
                        && let Some(close) = self.italic_at(i, end)
                    {
                        out.push(Span::Italic(self.spans(i + 1, close)));
                        i = close + 1;
                    } else {
                        out.push_char('*');
                        after_star = true;
                        i += 1;
                    }
                }
                Atom::Char(c) => {
                    out.push_char(*c);
                    i += 1;
                }
            }
        }

        out.finish()
    }
}

/// Collects spans, merging adjacent literal characters into one `Text`.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span>,
    text: String,
}

impl SpanBuilder {
    fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    fn push(&mut self, span: Span) {
        self.flush_text();
        self.spans.push(span);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.spans.push(Span::Text(std::mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<Span> {
        self.flush_text();
        self.spans
    }
}
