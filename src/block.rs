/// Inline spans produced by the inline scanner.
///
/// Payloads hold raw note text. Escaping happens only when spans are
/// written out, so a span tree can never smuggle markup into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Code(String),
    Link { href: String, content: Vec<Span> },
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    LineBreak,
}

/// Block-level elements segmented from a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    CodeBlock {
        /// Info string after the opening fence, never rendered
        language: Option<String>,
        lines: Vec<String>,
    },
    /// A run of consecutive list lines of the same kind
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Paragraph {
        lines: Vec<String>,
    },
}

impl Block {
    /// Short lowercase name, used by the block dump.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::CodeBlock { .. } => "code",
            Block::List { ordered: true, .. } => "ordered-list",
            Block::List { ordered: false, .. } => "list",
            Block::Paragraph { .. } => "paragraph",
        }
    }
}
