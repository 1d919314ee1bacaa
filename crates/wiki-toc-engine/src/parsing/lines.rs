/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A reference to a single source line with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef<'a> {
    /// Zero-based line number.
    pub index: usize,
    /// Byte span of this line (includes the newline if present).
    pub span: Span,
    /// The line text without its line ending.
    pub text: &'a str,
}

/// Returns an iterator over lines with their byte spans.
///
/// Spans keep the newline so consecutive spans tile the whole input.
pub fn lines_with_spans(s: &str) -> impl Iterator<Item = LineRef<'_>> + '_ {
    let mut offset = 0usize;
    s.split_inclusive('\n').enumerate().map(move |(index, raw)| {
        let start = offset;
        offset += raw.len();
        LineRef {
            index,
            span: Span { start, end: offset },
            text: raw.trim_end_matches(['\r', '\n']),
        }
    })
}
