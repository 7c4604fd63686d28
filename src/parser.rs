use std::sync::LazyLock;

use regex::Regex;

use crate::block::Block;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.+)$").unwrap());

const FENCE: &str = "```";

/// Split into lines, treating `\r\n` like `\n`. A lone `\r` is kept as text.
fn split_lines(markdown: &str) -> impl Iterator<Item = &str> {
    // `str::split` keeps a trailing empty line, which is harmless: blank
    // lines only ever flush.
    markdown
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Segment note text into blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut state = ParseState::default();

    for line in split_lines(markdown) {
        state.process_line(line);
    }

    state.finish()
}

/// The block under construction outside a fence
#[derive(Default)]
enum Pending {
    #[default]
    None,
    Paragraph(Vec<String>),
    List { ordered: bool, items: Vec<String> },
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    pending: Pending,

    // Fence state
    fence: Option<Fence>,
}

struct Fence {
    language: Option<String>,
    lines: Vec<String>,
}

impl Fence {
    fn open(info: &str) -> Self {
        let info = info.trim();
        Fence {
            language: (!info.is_empty()).then(|| info.to_string()),
            lines: Vec::new(),
        }
    }

    fn into_block(self) -> Block {
        Block::CodeBlock {
            language: self.language,
            lines: self.lines,
        }
    }
}

impl ParseState {
    fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // Inside a fence only the closing fence is special
        if let Some(fence) = self.fence.as_mut() {
            if trimmed.starts_with(FENCE) {
                if let Some(fence) = self.fence.take() {
                    self.blocks.push(fence.into_block());
                }
            } else {
                fence.lines.push(line.to_string());
            }
            return;
        }

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            self.flush();
            self.fence = Some(Fence::open(info));
            return;
        }

        if trimmed.is_empty() {
            self.flush();
            return;
        }

        if let Some(caps) = HEADING.captures(line) {
            self.flush();
            self.blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                text: caps[2].to_string(),
            });
            return;
        }

        if let Some(caps) = BULLET_ITEM.captures(line) {
            self.push_item(false, &caps[1]);
            return;
        }

        if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.push_item(true, &caps[1]);
            return;
        }

        // Plain text never joins a list
        if matches!(self.pending, Pending::List { .. }) {
            self.flush();
        }
        match &mut self.pending {
            Pending::Paragraph(lines) => lines.push(line.to_string()),
            _ => self.pending = Pending::Paragraph(vec![line.to_string()]),
        }
    }

    fn push_item(&mut self, ordered: bool, item: &str) {
        match &mut self.pending {
            Pending::List { ordered: kind, items } if *kind == ordered => {
                items.push(item.to_string());
            }
            _ => {
                self.flush();
                self.pending = Pending::List {
                    ordered,
                    items: vec![item.to_string()],
                };
            }
        }
    }

    /// Emit the pending paragraph or list, if any
    fn flush(&mut self) {
        match std::mem::take(&mut self.pending) {
            Pending::None => {}
            Pending::Paragraph(lines) => self.blocks.push(Block::Paragraph { lines }),
            Pending::List { ordered, items } => self.blocks.push(Block::List { ordered, items }),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // An unterminated fence keeps whatever it captured
        match self.fence.take() {
            Some(fence) => self.blocks.push(fence.into_block()),
            None => self.flush(),
        }
        log::trace!("segmented note into {} blocks", self.blocks.len());
        self.blocks
    }
}
