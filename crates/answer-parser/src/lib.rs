//! answer-parser: Parser for the markdown subset used in chat answers
//!
//! This crate provides:
//! - A line-based block scanner with pipe-table accumulation
//! - An inline tokenizer for bold, italic and inline code spans
//! - Block and inline node types
//!
//! Both entry points are total: any string input produces a result.
//!
//! # Example
//!
//! ```
//! use answer_parser::{scan_blocks, tokenize_inline, BlockNode, InlineSpan};
//!
//! let blocks = scan_blocks("# Summary\n\nRevenue grew **12%**.");
//! assert_eq!(blocks[0], BlockNode::heading(1, "Summary"));
//!
//! let spans = tokenize_inline(blocks[2].text().unwrap());
//! assert_eq!(spans[1], InlineSpan::bold("12%"));
//! ```

pub mod ast;
pub mod block;
pub mod inline;

// Re-export main types for convenient access
pub use ast::{BlockNode, InlineSpan};
#[cfg(feature = "json")]
pub use ast::{blocks_from_json, blocks_to_json, blocks_to_json_pretty};
pub use block::{LineKind, Scanner, TableState, classify_line, scan_blocks};
pub use inline::{PRIORITY, SpanKind, find_delimited, plain_text, tokenize_inline};
