//! Answer markdown node types
//!
//! Block nodes produced by the scanner and inline spans produced by the
//! tokenizer. Block nodes still carry raw inline text; the render layer
//! tokenizes it.

use serde::{Deserialize, Serialize};

/// A block-level node, one per classified source line (or one per table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockNode {
    /// `#`, `##` or `###` heading
    Heading { level: u8, text: String },

    /// Ordered (`1. `) or unordered (`- `, `* `) list item
    ListItem { ordered: bool, text: String },

    /// Pipe table
    Table {
        /// Cells of the first row; may be empty
        headers: Vec<String>,
        /// Data rows, cell counts are not normalized
        rows: Vec<Vec<String>>,
    },

    /// Any line that matched nothing else
    Paragraph { text: String },

    /// Blank line
    LineBreak,
}

/// An inline span within the text of a block or table cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineSpan {
    /// Literal text
    Text { value: String },
    /// `**value**`
    Bold { value: String },
    /// `*value*`
    Italic { value: String },
    /// `` `value` ``
    Code { value: String },
}

impl BlockNode {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        BlockNode::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn list_item(ordered: bool, text: impl Into<String>) -> Self {
        BlockNode::ListItem {
            ordered,
            text: text.into(),
        }
    }

    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        BlockNode::Table { headers, rows }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockNode::Paragraph { text: text.into() }
    }

    /// Raw inline text of a text-bearing block
    ///
    /// Returns `None` for tables and line breaks.
    pub fn text(&self) -> Option<&str> {
        match self {
            BlockNode::Heading { text, .. }
            | BlockNode::ListItem { text, .. }
            | BlockNode::Paragraph { text } => Some(text),
            BlockNode::Table { .. } | BlockNode::LineBreak => None,
        }
    }
}

impl InlineSpan {
    pub fn text(value: impl Into<String>) -> Self {
        InlineSpan::Text {
            value: value.into(),
        }
    }

    pub fn bold(value: impl Into<String>) -> Self {
        InlineSpan::Bold {
            value: value.into(),
        }
    }

    pub fn italic(value: impl Into<String>) -> Self {
        InlineSpan::Italic {
            value: value.into(),
        }
    }

    pub fn code(value: impl Into<String>) -> Self {
        InlineSpan::Code {
            value: value.into(),
        }
    }

    /// The span's content without any markup
    pub fn value(&self) -> &str {
        match self {
            InlineSpan::Text { value }
            | InlineSpan::Bold { value }
            | InlineSpan::Italic { value }
            | InlineSpan::Code { value } => value,
        }
    }
}

/// Serialize scanned blocks to a JSON string
#[cfg(feature = "json")]
pub fn blocks_to_json(blocks: &[BlockNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string(blocks)
}

/// Serialize scanned blocks to a pretty-printed JSON string
#[cfg(feature = "json")]
pub fn blocks_to_json_pretty(blocks: &[BlockNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(blocks)
}

/// Deserialize scanned blocks from a JSON string
#[cfg(feature = "json")]
pub fn blocks_from_json(json: &str) -> Result<Vec<BlockNode>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_text() {
        assert_eq!(BlockNode::heading(2, "Title").text(), Some("Title"));
        assert_eq!(BlockNode::list_item(true, "one").text(), Some("one"));
        assert_eq!(BlockNode::paragraph("body").text(), Some("body"));
        assert_eq!(BlockNode::LineBreak.text(), None);
        assert_eq!(BlockNode::table(vec![], vec![]).text(), None);
    }

    #[test]
    fn test_span_value() {
        assert_eq!(InlineSpan::text("a").value(), "a");
        assert_eq!(InlineSpan::bold("b").value(), "b");
        assert_eq!(InlineSpan::italic("c").value(), "c");
        assert_eq!(InlineSpan::code("d").value(), "d");
    }

    #[test]
    fn test_serialize_block() {
        let json = serde_json::to_string(&BlockNode::heading(1, "Title")).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":1,"text":"Title"}"#);

        let json = serde_json::to_string(&BlockNode::LineBreak).unwrap();
        assert_eq!(json, r#"{"type":"lineBreak"}"#);
    }

    #[test]
    fn test_serialize_span() {
        let json = serde_json::to_string(&InlineSpan::code("x")).unwrap();
        assert_eq!(json, r#"{"type":"code","value":"x"}"#);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_blocks_json_roundtrip() {
        let blocks = vec![
            BlockNode::heading(1, "Title"),
            BlockNode::table(
                vec!["A".to_string()],
                vec![vec!["1".to_string()], vec![]],
            ),
            BlockNode::LineBreak,
        ];

        let json = blocks_to_json(&blocks).unwrap();
        assert_eq!(blocks_from_json(&json).unwrap(), blocks);

        let pretty = blocks_to_json_pretty(&blocks).unwrap();
        assert!(pretty.contains("\"type\": \"table\""));
    }
}
