//! Safe markdown-to-HTML rendering for short personal notes.
//!
//! The supported subset is small on purpose: ATX headings, fenced code
//! blocks, flat bullet and numbered lists, paragraphs, and inline code,
//! links, bold and italic. Every piece of note text is escaped on its way
//! out and link targets go through an allowlist, so a note can never
//! produce executable markup.

mod block;
mod config;
pub mod edit;
mod error;
mod excerpt;
mod html;
mod inline;
mod parser;
mod sanitize;

pub use block::{Block, Span};
pub use config::{Config, ExcerptConfig, Limits, Overflow, PageConfig};
pub use error::{Error, Result};
pub use excerpt::excerpt;
pub use html::standalone_page;
pub use inline::{format_inline, parse_inlines, parse_lines, write_spans};
pub use sanitize::{FALLBACK_HREF, escape, sanitize_href};

/// Segment note text into blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert blocks to an HTML fragment.
pub fn blocks_to_html(blocks: &[Block]) -> String {
    html::blocks_to_html(blocks)
}

/// Convert note text to an HTML fragment.
///
/// Accepts `&str` or `Option<&str>`; a missing note renders as an empty
/// string. Never fails: malformed markdown degrades to escaped literal
/// text.
pub fn markdown_to_html<'a>(markdown: impl Into<Option<&'a str>>) -> String {
    let blocks = parse(markdown.into().unwrap_or_default());
    log::debug!("rendering {} blocks", blocks.len());
    html::blocks_to_html(&blocks)
}

/// Convert note text to a standalone HTML document titled per `config`.
pub fn markdown_to_page(markdown: &str, config: &PageConfig) -> String {
    standalone_page(&markdown_to_html(markdown), &config.title, &config.lang)
}
