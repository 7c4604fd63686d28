use crate::block::Block;
use crate::inline::{parse_inlines, parse_lines, write_spans};
use crate::sanitize::escape_into;

/// Convert blocks to an HTML fragment
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, &mut out);
    }
    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!("<h{level}>"));
            write_spans(&parse_inlines(text), out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::CodeBlock { lines, .. } => {
            // Code content is escaped but never formatted
            out.push_str("<pre><code>");
            escape_into(&lines.join("\n"), out);
            out.push_str("</code></pre>");
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>"));
            for item in items {
                out.push_str("<li>");
                write_spans(&parse_inlines(item), out);
                out.push_str("</li>");
            }
            out.push_str(&format!("</{tag}>"));
        }
        Block::Paragraph { lines } => {
            out.push_str("<p>");
            write_spans(&parse_lines(lines), out);
            out.push_str("</p>");
        }
    }
}

/// Wrap a rendered fragment in a minimal HTML5 document.
pub fn standalone_page(body: &str, title: &str, lang: &str) -> String {
    let mut out = String::with_capacity(body.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html lang=\"");
    escape_into(lang, &mut out);
    out.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
    escape_into(title, &mut out);
    out.push_str("</title>\n</head>\n<body>\n");
    out.push_str(body);
    out.push_str("\n</body>\n</html>\n");
    out
}
