//! Content tree to plain text writer
//!
//! Produces terminal-friendly text: markup is dropped, headings are
//! underlined and tables are drawn with `tabled`.

use std::str::FromStr;

use answer_parser::{InlineSpan, plain_text};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::RenderError;
use crate::tree::{Block, Document};

/// Border style used for tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    #[default]
    Ascii,
    Modern,
    Markdown,
    Rounded,
}

impl TableStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStyle::Ascii => "ascii",
            TableStyle::Modern => "modern",
            TableStyle::Markdown => "markdown",
            TableStyle::Rounded => "rounded",
        }
    }
}

impl FromStr for TableStyle {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(TableStyle::Ascii),
            "modern" => Ok(TableStyle::Modern),
            "markdown" => Ok(TableStyle::Markdown),
            "rounded" => Ok(TableStyle::Rounded),
            _ => Err(RenderError::UnknownTableStyle(s.to_string())),
        }
    }
}

/// Options for the plain text writer
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    pub table_style: TableStyle,
}

/// Convert a content tree to plain text
pub fn document_to_text(doc: &Document, options: &TextOptions) -> String {
    let mut lines: Vec<String> = Vec::new();
    // Number of the next item in the current run of ordered items
    let mut next_number = 1;

    for block in &doc.blocks {
        if !matches!(block, Block::ListItem { ordered: true, .. }) {
            next_number = 1;
        }

        match block {
            Block::Heading { level, content } => {
                let text = plain_text(content);
                let underline = match level {
                    1 => Some('='),
                    2 => Some('-'),
                    _ => None,
                };
                let width = text.chars().count();
                lines.push(text);
                if let Some(ch) = underline {
                    lines.push(ch.to_string().repeat(width));
                }
            }
            Block::ListItem { ordered, content } => {
                let text = plain_text(content);
                if *ordered {
                    lines.push(format!("{}. {}", next_number, text));
                    next_number += 1;
                } else {
                    lines.push(format!("- {}", text));
                }
            }
            Block::Table { headers, rows } => {
                if let Some(table) = draw_table(headers, rows, options.table_style) {
                    lines.extend(table.lines().map(str::to_string));
                }
            }
            Block::Paragraph { content } => lines.push(plain_text(content)),
            Block::LineBreak => lines.push(String::new()),
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Draw a table, padding ragged rows to the widest row
fn draw_table(
    headers: &[Vec<InlineSpan>],
    rows: &[Vec<Vec<InlineSpan>>],
    style: TableStyle,
) -> Option<String> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return None;
    }

    let mut builder = Builder::default();
    if !headers.is_empty() {
        builder.push_record(padded_row(headers, columns));
    }
    for row in rows {
        builder.push_record(padded_row(row, columns));
    }

    let mut table = builder.build();
    match style {
        TableStyle::Ascii => table.with(Style::ascii()),
        TableStyle::Modern => table.with(Style::modern()),
        TableStyle::Markdown => table.with(Style::markdown()),
        TableStyle::Rounded => table.with(Style::rounded()),
    };
    Some(table.to_string())
}

fn padded_row(cells: &[Vec<InlineSpan>], columns: usize) -> Vec<String> {
    let mut row: Vec<String> = cells.iter().map(|cell| plain_text(cell)).collect();
    row.resize(columns, String::new());
    row
}
