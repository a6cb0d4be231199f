//! Content tree to HTML writer
//!
//! Maps each block to its HTML element. Consecutive list items of the same
//! kind share one `<ul>`/`<ol>`, and a table only gets a `<thead>` when it
//! has headers.

use answer_parser::InlineSpan;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::tree::{Block, Document};

/// Options for the HTML writer
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap every table in `<div class="...">` (e.g. for horizontal scrolling)
    pub table_wrapper_class: Option<String>,
    /// Mark body rows with alternating `odd`/`even` classes
    pub striped_rows: bool,
    /// Emit a complete HTML document instead of a fragment
    pub standalone: bool,
    /// `<title>` of a standalone document
    pub title: Option<String>,
}

/// Convert a content tree to HTML
pub fn document_to_html(doc: &Document, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter::new(options);
    writer.write_document(doc);
    writer.output
}

/// HTML writer state
struct HtmlWriter<'a> {
    options: &'a HtmlOptions,
    output: String,
    /// Kind of the list currently open (`true` = ordered)
    open_list: Option<bool>,
}

impl<'a> HtmlWriter<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            output: String::new(),
            open_list: None,
        }
    }

    fn write_document(&mut self, doc: &Document) {
        if self.options.standalone {
            self.write_preamble();
        }

        for block in &doc.blocks {
            self.write_block(block);
        }
        self.close_list();

        if self.options.standalone {
            self.output.push_str("</body>\n</html>\n");
        }
    }

    fn write_preamble(&mut self) {
        self.output.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        self.output.push_str("<meta charset=\"utf-8\">\n");
        if let Some(title) = &self.options.title {
            self.output.push_str("<title>");
            self.output.push_str(&encode_text(title));
            self.output.push_str("</title>\n");
        }
        self.output.push_str("</head>\n<body>\n");
    }

    fn write_block(&mut self, block: &Block) {
        if let Block::ListItem { ordered, content } = block {
            self.write_list_item(*ordered, content);
            return;
        }

        self.close_list();
        match block {
            Block::Heading { level, content } => {
                let level = (*level).clamp(1, 6);
                self.output.push_str(&format!("<h{}>", level));
                self.write_spans(content);
                self.output.push_str(&format!("</h{}>\n", level));
            }
            Block::Table { headers, rows } => self.write_table(headers, rows),
            Block::Paragraph { content } => {
                self.output.push_str("<p>");
                self.write_spans(content);
                self.output.push_str("</p>\n");
            }
            Block::LineBreak => self.output.push_str("<br>\n"),
            Block::ListItem { .. } => {}
        }
    }

    fn write_list_item(&mut self, ordered: bool, content: &[InlineSpan]) {
        if self.open_list != Some(ordered) {
            self.close_list();
            self.output.push_str(if ordered { "<ol>\n" } else { "<ul>\n" });
            self.open_list = Some(ordered);
        }
        self.output.push_str("<li>");
        self.write_spans(content);
        self.output.push_str("</li>\n");
    }

    fn close_list(&mut self) {
        if let Some(ordered) = self.open_list.take() {
            self.output
                .push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
        }
    }

    fn write_table(&mut self, headers: &[Vec<InlineSpan>], rows: &[Vec<Vec<InlineSpan>>]) {
        let wrapper = self.options.table_wrapper_class.as_deref();
        if let Some(class) = wrapper {
            self.output.push_str(&format!(
                "<div class=\"{}\">\n",
                encode_double_quoted_attribute(class)
            ));
        }

        self.output.push_str("<table>\n");
        if !headers.is_empty() {
            self.output.push_str("<thead>\n<tr>");
            for cell in headers {
                self.output.push_str("<th>");
                self.write_spans(cell);
                self.output.push_str("</th>");
            }
            self.output.push_str("</tr>\n</thead>\n");
        }

        self.output.push_str("<tbody>\n");
        for (i, row) in rows.iter().enumerate() {
            if self.options.striped_rows {
                let class = if i % 2 == 0 { "odd" } else { "even" };
                self.output.push_str(&format!("<tr class=\"{}\">", class));
            } else {
                self.output.push_str("<tr>");
            }
            for cell in row {
                self.output.push_str("<td>");
                self.write_spans(cell);
                self.output.push_str("</td>");
            }
            self.output.push_str("</tr>\n");
        }
        self.output.push_str("</tbody>\n</table>\n");

        if wrapper.is_some() {
            self.output.push_str("</div>\n");
        }
    }

    fn write_spans(&mut self, spans: &[InlineSpan]) {
        for span in spans {
            self.write_span(span);
        }
    }

    fn write_span(&mut self, span: &InlineSpan) {
        let (open, close, value) = match span {
            InlineSpan::Text { value } => {
                self.output.push_str(&encode_text(value));
                return;
            }
            InlineSpan::Bold { value } => ("<strong>", "</strong>", value),
            InlineSpan::Italic { value } => ("<em>", "</em>", value),
            InlineSpan::Code { value } => ("<code>", "</code>", value),
        };
        self.output.push_str(open);
        self.output.push_str(&encode_text(value));
        self.output.push_str(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::render;

    fn html(markdown: &str) -> String {
        document_to_html(&render(markdown), &HtmlOptions::default())
    }

    #[test]
    fn test_paragraph_with_spans() {
        insta::assert_snapshot!(
            html("Revenue grew **12%** in *Q3* (`est`)."),
            @"<p>Revenue grew <strong>12%</strong> in <em>Q3</em> (<code>est</code>).</p>"
        );
    }

    #[test]
    fn test_full_answer() {
        let markdown = "## Summary\n\nRevenue grew.\n1. North\n2. South\n- note\n\n| Region | Growth |\n|---|---|\n| North | `4%` |\n| South | 0% |";
        insta::assert_snapshot!(html(markdown), @r"
        <h2>Summary</h2>
        <br>
        <p>Revenue grew.</p>
        <ol>
        <li>North</li>
        <li>South</li>
        </ol>
        <ul>
        <li>note</li>
        </ul>
        <br>
        <table>
        <thead>
        <tr><th>Region</th><th>Growth</th></tr>
        </thead>
        <tbody>
        <tr><td>North</td><td><code>4%</code></td></tr>
        <tr><td>South</td><td>0%</td></tr>
        </tbody>
        </table>
        ");
    }

    #[test]
    fn test_headerless_table_has_no_thead() {
        let doc = Document::new(vec![Block::table(
            vec![],
            vec![vec![vec![InlineSpan::text("1")]]],
        )]);
        let out = document_to_html(&doc, &HtmlOptions::default());
        assert!(!out.contains("<thead>"));
        assert!(out.contains("<tr><td>1</td></tr>"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(
            html("a < b & **<c>**"),
            "<p>a &lt; b &amp; <strong>&lt;c&gt;</strong></p>\n"
        );
    }

    #[test]
    fn test_list_closed_by_other_block() {
        assert_eq!(
            html("- a\ntext\n- b"),
            "<ul>\n<li>a</li>\n</ul>\n<p>text</p>\n<ul>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_list_kind_switch() {
        assert_eq!(
            html("1. a\n- b"),
            "<ol>\n<li>a</li>\n</ol>\n<ul>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_table_options() {
        let options = HtmlOptions {
            table_wrapper_class: Some("table-scroll".to_string()),
            striped_rows: true,
            ..Default::default()
        };
        let out = document_to_html(&render("| A |\n| 1 |\n| 2 |"), &options);
        insta::assert_snapshot!(out, @r#"
        <div class="table-scroll">
        <table>
        <thead>
        <tr><th>A</th></tr>
        </thead>
        <tbody>
        <tr class="odd"><td>1</td></tr>
        <tr class="even"><td>2</td></tr>
        </tbody>
        </table>
        </div>
        "#);
    }

    #[test]
    fn test_standalone_document() {
        let options = HtmlOptions {
            standalone: true,
            title: Some("Q&A".to_string()),
            ..Default::default()
        };
        let out = document_to_html(&render("# Hi"), &options);
        assert!(out.starts_with("<!DOCTYPE html>\n"));
        assert!(out.contains("<title>Q&amp;A</title>"));
        assert!(out.contains("<h1>Hi</h1>\n"));
        assert!(out.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn test_heading_level_clamped() {
        let doc = Document::new(vec![Block::heading(9, vec![InlineSpan::text("x")])]);
        assert_eq!(
            document_to_html(&doc, &HtmlOptions::default()),
            "<h6>x</h6>\n"
        );
    }
}
