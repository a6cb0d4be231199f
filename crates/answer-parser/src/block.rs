//! Block scanner
//!
//! Splits an answer into lines and classifies each one into a [`BlockNode`].
//! Contiguous pipe-table rows are gathered by a [`TableState`] and emitted as
//! a single table when the first non-table line (or the end of input) is
//! reached.

use tracing::{debug, trace};

use crate::ast::BlockNode;

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `| a | b |` row, cells trimmed
    TableRow(Vec<&'a str>),
    /// `|---|:--:|` divider (or a row without cells)
    Separator,
    Heading { level: u8, text: &'a str },
    OrderedItem(&'a str),
    UnorderedItem(&'a str),
    /// Line opening or closing a fenced code block
    Fence,
    Blank,
    Paragraph(&'a str),
}

/// Classify a line, first matching rule wins
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(kind) = classify_table_row(line) {
        return kind;
    }

    if let Some(text) = line.strip_prefix("### ") {
        LineKind::Heading { level: 3, text }
    } else if let Some(text) = line.strip_prefix("## ") {
        LineKind::Heading { level: 2, text }
    } else if let Some(text) = line.strip_prefix("# ") {
        LineKind::Heading { level: 1, text }
    } else if let Some(text) = strip_ordered_marker(line) {
        LineKind::OrderedItem(text)
    } else if let Some(text) = strip_unordered_marker(line) {
        LineKind::UnorderedItem(text)
    } else if line.starts_with("```") {
        LineKind::Fence
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Paragraph(line)
    }
}

/// Recognize a pipe-table row.
///
/// The fragments before the first and after the last `|` are dropped. The
/// separator test runs on the raw cells, so a whitespace-only cell counts as
/// a divider cell while an empty one does not.
fn classify_table_row(line: &str) -> Option<LineKind<'_>> {
    let trimmed = line.trim();
    if !(trimmed.starts_with('|') && trimmed.ends_with('|')) {
        return None;
    }

    let fragments: Vec<&str> = line.split('|').collect();
    let cells = &fragments[1..fragments.len() - 1];

    if cells.iter().all(|cell| is_separator_cell(cell)) {
        return Some(LineKind::Separator);
    }

    Some(LineKind::TableRow(cells.iter().map(|cell| cell.trim()).collect()))
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty()
        && cell
            .chars()
            .all(|ch| ch.is_whitespace() || ch == '-' || ch == ':')
}

/// Strip a `<digits>.<space>` marker
fn strip_ordered_marker(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    strip_marker_space(rest)
}

/// Strip a `-<space>` or `*<space>` marker
fn strip_unordered_marker(line: &str) -> Option<&str> {
    line.strip_prefix(['-', '*']).and_then(strip_marker_space)
}

/// Strip the single whitespace character that must follow a list marker
fn strip_marker_space(rest: &str) -> Option<&str> {
    let mut chars = rest.chars();
    let ch = chars.next()?;
    ch.is_whitespace().then(|| chars.as_str())
}

/// Pipe-table accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableState {
    #[default]
    Idle,
    InTable {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl TableState {
    pub fn is_active(&self) -> bool {
        matches!(self, TableState::InTable { .. })
    }

    /// Add a non-separator row: the first one becomes the header row
    pub fn push_row(&mut self, cells: Vec<String>) {
        match self {
            TableState::Idle => {
                *self = TableState::InTable {
                    headers: cells,
                    rows: Vec::new(),
                };
            }
            TableState::InTable { rows, .. } => rows.push(cells),
        }
    }

    /// Close the pending table and return to `Idle`.
    ///
    /// A table without data rows produces nothing.
    pub fn finish(&mut self) -> Option<BlockNode> {
        match std::mem::take(self) {
            TableState::Idle => None,
            TableState::InTable { headers, rows } if rows.is_empty() => {
                debug!(columns = headers.len(), "dropping table without data rows");
                None
            }
            TableState::InTable { headers, rows } => {
                debug!(
                    columns = headers.len(),
                    rows = rows.len(),
                    "finished table"
                );
                Some(BlockNode::Table { headers, rows })
            }
        }
    }
}

/// Line-by-line block scanner
#[derive(Debug, Default)]
pub struct Scanner {
    blocks: Vec<BlockNode>,
    table: TableState,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line (without its line terminator)
    pub fn feed(&mut self, line: &str) {
        let kind = classify_line(line);

        // Any non-table line closes a pending table before it is handled
        if !matches!(kind, LineKind::Separator | LineKind::TableRow(_)) {
            self.flush_table();
        }

        match kind {
            LineKind::Separator => {
                trace!(line, "skipping table separator row");
            }
            LineKind::TableRow(cells) => {
                self.table
                    .push_row(cells.into_iter().map(str::to_string).collect());
            }
            LineKind::Heading { level, text } => {
                self.blocks.push(BlockNode::heading(level, text));
            }
            LineKind::OrderedItem(text) => {
                self.blocks.push(BlockNode::list_item(true, text));
            }
            LineKind::UnorderedItem(text) => {
                self.blocks.push(BlockNode::list_item(false, text));
            }
            LineKind::Fence => {
                trace!(line, "skipping code fence delimiter");
            }
            LineKind::Blank => self.blocks.push(BlockNode::LineBreak),
            LineKind::Paragraph(text) => {
                self.blocks.push(BlockNode::paragraph(text));
            }
        }
    }

    /// Flush any pending table and return the scanned blocks
    pub fn finish(mut self) -> Vec<BlockNode> {
        self.flush_table();
        self.blocks
    }

    fn flush_table(&mut self) {
        if let Some(table) = self.table.finish() {
            self.blocks.push(table);
        }
    }
}

/// Split text into lines on `\n`, dropping a trailing `\r` from each line
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Scan a complete answer into block nodes
pub fn scan_blocks(text: &str) -> Vec<BlockNode> {
    let mut scanner = Scanner::new();
    for line in lines(text) {
        scanner.feed(line);
    }
    scanner.finish()
}
