//! Inline tokenizer
//!
//! Splits the text of one block (or table cell) into [`InlineSpan`]s.
//!
//! At each step the kinds in [`PRIORITY`] are tried in order against the
//! unconsumed suffix and the first kind with any match wins, even when a
//! lower-priority kind would match earlier in the text. This is what keeps
//! `**a**` from being read as two italic markers, and it also means that in
//! `` `x` and **y** `` the backticks stay literal because the bold match is
//! taken first.

use crate::ast::InlineSpan;

/// Delimited span kinds recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    Code,
}

/// Order in which span kinds are tried at every step
pub const PRIORITY: [SpanKind; 3] = [SpanKind::Bold, SpanKind::Italic, SpanKind::Code];

impl SpanKind {
    /// Opening and closing delimiter
    pub fn delimiter(self) -> &'static str {
        match self {
            SpanKind::Bold => "**",
            SpanKind::Italic => "*",
            SpanKind::Code => "`",
        }
    }

    fn span(self, value: &str) -> InlineSpan {
        match self {
            SpanKind::Bold => InlineSpan::bold(value),
            SpanKind::Italic => InlineSpan::italic(value),
            SpanKind::Code => InlineSpan::code(value),
        }
    }
}

/// A delimited match within a string, as byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedMatch {
    /// Offset of the opening delimiter
    pub start: usize,
    /// Offset just past the closing delimiter
    pub end: usize,
    /// Offset of the first inner character
    pub inner_start: usize,
    /// Offset of the closing delimiter
    pub inner_end: usize,
}

/// Find the leftmost `<delim>inner<delim>` with the shortest non-empty inner
/// text that stays on one line.
pub fn find_delimited(text: &str, delimiter: &str) -> Option<DelimitedMatch> {
    let mut from = 0;
    while let Some(offset) = text[from..].find(delimiter) {
        let start = from + offset;
        let inner_start = start + delimiter.len();
        if let Some(inner_len) = closing_offset(&text[inner_start..], delimiter) {
            let inner_end = inner_start + inner_len;
            return Some(DelimitedMatch {
                start,
                end: inner_end + delimiter.len(),
                inner_start,
                inner_end,
            });
        }
        // delimiters are ASCII, so the next byte is a char boundary
        from = start + 1;
    }
    None
}

/// Offset of the first closing delimiter after at least one inner character
fn closing_offset(rest: &str, delimiter: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    let (_, first) = chars.next()?;
    if is_line_terminator(first) {
        return None;
    }

    for (pos, ch) in chars {
        if rest[pos..].starts_with(delimiter) {
            return Some(pos);
        }
        if is_line_terminator(ch) {
            return None;
        }
    }
    None
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Tokenize inline markup into spans
pub fn tokenize_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let found = PRIORITY.iter().find_map(|&kind| {
            find_delimited(remaining, kind.delimiter()).map(|m| (kind, m))
        });

        let Some((kind, m)) = found else {
            spans.push(InlineSpan::text(remaining));
            break;
        };

        if m.start > 0 {
            spans.push(InlineSpan::text(&remaining[..m.start]));
        }
        spans.push(kind.span(&remaining[m.inner_start..m.inner_end]));
        remaining = &remaining[m.end..];
    }

    spans
}

/// Concatenate span contents, dropping all markup
pub fn plain_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::value).collect()
}
