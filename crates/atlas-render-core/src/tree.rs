//! Content tree types
//!
//! The fully rendered form of an answer: block nodes whose text has been
//! split into inline spans. This is what display layers consume.

use answer_parser::InlineSpan;
use serde::{Deserialize, Serialize};

/// Root of a rendered answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A rendered block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<InlineSpan>,
    },
    ListItem {
        ordered: bool,
        content: Vec<InlineSpan>,
    },
    Table {
        /// Empty when the table has no header row to show
        headers: Vec<Vec<InlineSpan>>,
        rows: Vec<Vec<Vec<InlineSpan>>>,
    },
    Paragraph {
        content: Vec<InlineSpan>,
    },
    LineBreak,
}

// Convenience constructors
impl Block {
    pub fn heading(level: u8, content: Vec<InlineSpan>) -> Self {
        Block::Heading { level, content }
    }

    pub fn list_item(ordered: bool, content: Vec<InlineSpan>) -> Self {
        Block::ListItem { ordered, content }
    }

    pub fn table(headers: Vec<Vec<InlineSpan>>, rows: Vec<Vec<Vec<InlineSpan>>>) -> Self {
        Block::Table { headers, rows }
    }

    pub fn paragraph(content: Vec<InlineSpan>) -> Self {
        Block::Paragraph { content }
    }

    pub fn line_break() -> Self {
        Block::LineBreak
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of every block with all markup removed, one block per line.
    ///
    /// Table cells are joined with a tab; line breaks become empty lines.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Heading { content, .. }
                | Block::ListItem { content, .. }
                | Block::Paragraph { content } => lines.push(answer_parser::plain_text(content)),
                Block::Table { headers, rows } => {
                    if !headers.is_empty() {
                        lines.push(join_cells(headers));
                    }
                    lines.extend(rows.iter().map(|row| join_cells(row)));
                }
                Block::LineBreak => lines.push(String::new()),
            }
        }
        lines.join("\n")
    }
}

fn join_cells(cells: &[Vec<InlineSpan>]) -> String {
    cells
        .iter()
        .map(|cell| answer_parser::plain_text(cell))
        .collect::<Vec<_>>()
        .join("\t")
}
