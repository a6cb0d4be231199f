//! Output formats
//!
//! Ties scanning, conversion and the writers together behind one call.

use std::fmt;
use std::str::FromStr;

use answer_parser::{blocks_to_json_pretty, scan_blocks};

use crate::convert::blocks_to_document;
use crate::error::{RenderError, RenderResult};
use crate::html::{HtmlOptions, document_to_html};
use crate::text::{TextOptions, document_to_text};

/// Output format for a rendered answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Html,
    /// Plain text for terminals
    Text,
    /// The content tree as JSON
    Json,
    /// The scanned blocks as JSON, before inline tokenization
    Blocks,
}

impl OutputFormat {
    /// File extension for output files
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Blocks => "blocks.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Blocks => "blocks",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "blocks" => Ok(OutputFormat::Blocks),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Writer options for every format
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub html: HtmlOptions,
    pub text: TextOptions,
}

/// Render an answer string in the given format
pub fn render_to_string(
    answer: &str,
    format: OutputFormat,
    options: &RenderOptions,
) -> RenderResult<String> {
    let blocks = scan_blocks(answer);

    let mut output = match format {
        OutputFormat::Html => document_to_html(&blocks_to_document(&blocks), &options.html),
        OutputFormat::Text => document_to_text(&blocks_to_document(&blocks), &options.text),
        OutputFormat::Json => serde_json::to_string_pretty(&blocks_to_document(&blocks))
            .map_err(RenderError::Serialize)?,
        OutputFormat::Blocks => blocks_to_json_pretty(&blocks).map_err(RenderError::Serialize)?,
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Document;

    #[test]
    fn test_format_from_str() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("blocks".parse::<OutputFormat>().unwrap(), OutputFormat::Blocks);
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown output format: pdf (expected html, text, json or blocks)"
        );
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Blocks.extension(), "blocks.json");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_render_html() {
        let out = render_to_string("# Hi", OutputFormat::Html, &RenderOptions::default()).unwrap();
        assert_eq!(out, "<h1>Hi</h1>\n");
    }

    #[test]
    fn test_render_json_is_content_tree() {
        let out = render_to_string("*a*", OutputFormat::Json, &RenderOptions::default()).unwrap();
        let doc: Document = serde_json::from_str(&out).unwrap();
        assert_eq!(doc, crate::convert::render("*a*"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_render_blocks_keeps_raw_text() {
        let out =
            render_to_string("- **x**", OutputFormat::Blocks, &RenderOptions::default()).unwrap();
        assert!(out.contains("\"text\": \"**x**\""));
        assert!(out.contains("\"type\": \"listItem\""));
    }

    #[test]
    fn test_render_text() {
        let out = render_to_string("**a** b", OutputFormat::Text, &RenderOptions::default()).unwrap();
        assert_eq!(out, "a b\n");
    }
}
