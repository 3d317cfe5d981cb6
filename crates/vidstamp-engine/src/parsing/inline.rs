//! Inline timestamp detection inside descriptions.
//!
//! A description such as `"see 2:15 for details"` contains a time-like token
//! that should become its own clickable element. Matching is bounded by ASCII
//! word characters so `"v1:234"` or `"12:345"` never yield a partial
//! timestamp, while a time written straight after non-ASCII text (`"ดูที่2:15"`)
//! is still found.

use std::sync::OnceLock;

use regex::Regex;

use crate::time::{TIMESTAMP_PATTERN, parse_time};

/// A byte range `[start, end)` into the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Slices `s` with this span.
    pub fn slice(self, s: &str) -> &str {
        &s[self.start..self.end]
    }
}

/// A piece of description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text that isn't a timestamp.
    Text(Span),
    /// A timestamp-shaped token that parsed successfully.
    Timestamp { span: Span, seconds: u64 },
}

pub(crate) fn inline_regex() -> &'static Regex {
    static INLINE_REGEX: OnceLock<Regex> = OnceLock::new();
    INLINE_REGEX.get_or_init(|| {
        Regex::new(&format!(r"(?-u:\b)({TIMESTAMP_PATTERN})(?-u:\b)"))
            .expect("Invalid inline timestamp regex")
    })
}

/// Splits `s` into text and timestamp nodes covering the whole input.
///
/// A token that matches the timestamp shape but fails to parse stays part of
/// the surrounding text.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    for m in inline_regex().find_iter(s) {
        match parse_time(m.as_str()) {
            Ok(seconds) => {
                flush_text(&mut out, text_start, m.start());
                out.push(InlineNode::Timestamp {
                    span: Span {
                        start: m.start(),
                        end: m.end(),
                    },
                    seconds,
                });
                text_start = m.end();
            }
            Err(e) => log::debug!("leaving inline token as text: {e}"),
        }
    }

    flush_text(&mut out, text_start, s.len());
    out
}
