//! atlas-render-core: Core library for rendering chat answers
//!
//! This crate provides:
//! - Answer scanning and inline tokenizing (via `answer-parser`)
//! - The content tree handed to display layers
//! - HTML, plain text and JSON writers
//! - The answer service payload type
//!
//! ## Example
//!
//! ```rust
//! use atlas_render_core::{HtmlOptions, document_to_html, render};
//!
//! let doc = render("## Answer\n\nThe contract ends in **2027**.");
//! let html = document_to_html(&doc, &HtmlOptions::default());
//! assert!(html.contains("<strong>2027</strong>"));
//! ```

pub mod convert;
pub mod error;
pub mod format;
pub mod html;
pub mod payload;
pub mod text;
pub mod tree;

pub use answer_parser::{BlockNode, InlineSpan, scan_blocks, tokenize_inline};
pub use convert::{blocks_to_document, render};
pub use error::{RenderError, RenderResult};
pub use format::{OutputFormat, RenderOptions, render_to_string};
pub use html::{HtmlOptions, document_to_html};
pub use payload::{AnswerPayload, Citation};
pub use text::{TableStyle, TextOptions, document_to_text};
pub use tree::{Block, Document};
