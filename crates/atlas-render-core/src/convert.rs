//! Scanned blocks to content tree conversion
//!
//! Applies the inline tokenizer to every text-bearing block and table cell.

use answer_parser::{BlockNode, InlineSpan, scan_blocks, tokenize_inline};
use tracing::debug;

use crate::tree::{Block, Document};

/// Render an answer string into a content tree
pub fn render(text: &str) -> Document {
    let blocks = scan_blocks(text);
    let doc = blocks_to_document(&blocks);
    debug!(
        bytes = text.len(),
        blocks = doc.blocks.len(),
        "rendered answer"
    );
    doc
}

/// Convert scanned blocks into a content tree
pub fn blocks_to_document(blocks: &[BlockNode]) -> Document {
    Document::new(blocks.iter().map(convert_block).collect())
}

fn convert_block(block: &BlockNode) -> Block {
    match block {
        BlockNode::Heading { level, text } => Block::heading(*level, tokenize_inline(text)),
        BlockNode::ListItem { ordered, text } => Block::list_item(*ordered, tokenize_inline(text)),
        BlockNode::Table { headers, rows } => Block::table(
            convert_row(headers),
            rows.iter().map(|row| convert_row(row)).collect(),
        ),
        BlockNode::Paragraph { text } => Block::paragraph(tokenize_inline(text)),
        BlockNode::LineBreak => Block::LineBreak,
    }
}

fn convert_row(cells: &[String]) -> Vec<Vec<InlineSpan>> {
    cells.iter().map(|cell| tokenize_inline(cell)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let doc = render("# **Bold** title\n\nSee `x`.");
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading(
                    1,
                    vec![InlineSpan::bold("Bold"), InlineSpan::text(" title")]
                ),
                Block::LineBreak,
                Block::paragraph(vec![
                    InlineSpan::text("See "),
                    InlineSpan::code("x"),
                    InlineSpan::text("."),
                ]),
            ]
        );
    }

    #[test]
    fn test_render_list_items() {
        let doc = render("1. *one*\n- two");
        assert_eq!(
            doc.blocks,
            vec![
                Block::list_item(true, vec![InlineSpan::italic("one")]),
                Block::list_item(false, vec![InlineSpan::text("two")]),
            ]
        );
    }

    #[test]
    fn test_render_table_cells() {
        let doc = render("| **Name** | Value |\n|---|---|\n| `a` | |");
        assert_eq!(
            doc.blocks,
            vec![Block::table(
                vec![vec![InlineSpan::bold("Name")], vec![InlineSpan::text("Value")]],
                vec![vec![vec![InlineSpan::code("a")], vec![]]],
            )]
        );
    }

    #[test]
    fn test_render_empty_answer() {
        assert_eq!(render("").blocks, vec![Block::LineBreak]);
    }

    #[test]
    fn test_render_is_independent_per_call() {
        let first = render("| A |\n| 1 |");
        let second = render("| A |\n| 1 |");
        assert_eq!(first, second);
        assert_eq!(first.blocks.len(), 1);
    }

    #[test]
    fn test_render_parallel_calls() {
        let inputs = ["# a", "| h |\n| r |", "*x* `y`", ""];
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let input = input.to_string();
                std::thread::spawn(move || render(&input))
            })
            .collect();

        for (handle, input) in handles.into_iter().zip(inputs) {
            assert_eq!(handle.join().unwrap(), render(input));
        }
    }
}
