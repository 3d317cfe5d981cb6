//! # Document Parsing
//!
//! Turns loosely structured `timestamp description` text into an ordered list
//! of [`TimestampRecord`]s.
//!
//! ## Rules
//!
//! - Lines are trimmed; blank lines are ignored.
//! - A line starting with a timestamp token opens a new record. The rest of the
//!   line (possibly empty) is its description.
//! - Any other line continues the previous record's description, joined with
//!   `\n`. Before the first record such lines are discarded.
//! - A record whose token fails [`parse_time`] is dropped as a whole.
//!
//! ## Modules
//!
//! - **`record`**: [`TimestampRecord`]
//! - **`format`**: [`TimeFormat`], the per-document long/short decision
//! - **`inline`**: timestamp detection inside descriptions

pub mod format;
pub mod inline;
pub mod record;

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub use format::TimeFormat;
pub use inline::{InlineNode, parse_inline};
pub use record::TimestampRecord;

use crate::time::{TIMESTAMP_PATTERN, parse_time};

/// Result of parsing a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDoc {
    pub records: Vec<TimestampRecord>,
    pub format: TimeFormat,
}

impl ParsedDoc {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn record_start_regex() -> &'static Regex {
    static RECORD_START_REGEX: OnceLock<Regex> = OnceLock::new();
    RECORD_START_REGEX.get_or_init(|| {
        Regex::new(&format!(r"^({TIMESTAMP_PATTERN})\s*(.*)$"))
            .expect("Invalid record start regex")
    })
}

/// Splits a trimmed line into `(timestamp token, description)` if it opens a record.
pub fn split_record_start(line: &str) -> Option<(&str, &str)> {
    let caps = record_start_regex().captures(line)?;
    let token = caps.get(1)?;
    // `12:345` is not `12:34` followed by `5`
    if line[token.end()..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let token = token.as_str();
    let rest = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((token, rest))
}

/// Parses raw text into records, in document order.
pub fn parse_records(raw: &str) -> Vec<TimestampRecord> {
    // (token, description) pairs before time resolution
    let mut candidates: Vec<(&str, String)> = Vec::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((token, description)) = split_record_start(line) {
            candidates.push((token, description.to_string()));
        } else if let Some((_, description)) = candidates.last_mut() {
            description.push('\n');
            description.push_str(line);
        } else {
            log::debug!("discarding line before first timestamp: {line:?}");
        }
    }

    candidates
        .into_iter()
        .filter_map(|(token, description)| match parse_time(token) {
            Ok(time) => Some(TimestampRecord::new(time, token, description)),
            Err(e) => {
                log::warn!("Skipping invalid timestamp format: {e}");
                None
            }
        })
        .collect()
}

/// Parses raw text and decides the display format in one go.
pub fn parse_document(raw: &str) -> ParsedDoc {
    let records = parse_records(raw);
    let format = TimeFormat::decide(&records);
    ParsedDoc { records, format }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn times(doc: &ParsedDoc) -> Vec<u64> {
        doc.records.iter().map(|r| r.time).collect()
    }

    #[rstest]
    #[case("")]
    #[case("\n\n")]
    #[case("   \n\t\n")]
    #[case("no timestamps here\nat all")]
    fn yields_nothing(#[case] raw: &str) {
        let doc = parse_document(raw);
        assert!(doc.is_empty());
        assert_eq!(doc.format, TimeFormat::Short);
    }

    #[test]
    fn simple_lines() {
        let doc = parse_document("00:00 - Start\n02:15 Introduction\n05:30 What is the budget?");
        assert_eq!(times(&doc), vec![0, 135, 330]);
        assert_eq!(doc.records[0].description, "- Start");
        assert_eq!(doc.records[1].description, "Introduction");
        assert_eq!(doc.format, TimeFormat::Short);
    }

    #[test]
    fn multi_line_description() {
        let doc = parse_document("1:30 line one\nline two");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].time, 90);
        assert_eq!(doc.records[0].description, "line one\nline two");
    }

    #[test]
    fn continuation_lines_are_trimmed_and_blank_lines_skipped() {
        let doc = parse_document("  1:30   line one  \n\n     line two   \n");
        assert_eq!(doc.records[0].description, "line one\nline two");
    }

    #[test]
    fn orphan_lines_before_first_record_are_discarded() {
        let doc = parse_document("just text\n1:00 real");
        assert_eq!(times(&doc), vec![60]);
        assert_eq!(doc.records[0].description, "real");
    }

    #[test]
    fn non_numeric_line_continues_previous_record() {
        let doc = parse_document("1:00 ok\nbad:line\n2:00 also ok");
        assert_eq!(times(&doc), vec![60, 120]);
        assert_eq!(doc.records[0].description, "ok\nbad:line");
        assert_eq!(doc.records[1].description, "also ok");
    }

    #[test]
    fn non_numeric_line_without_previous_record_is_discarded() {
        let doc = parse_document("bad:line\n2:00 ok");
        assert_eq!(times(&doc), vec![120]);
        assert_eq!(doc.records[0].description, "ok");
    }

    #[test]
    fn timestamp_only_line_has_empty_description() {
        let doc = parse_document("12:00\n13:00 next");
        assert_eq!(doc.records[0].description, "");
        assert_eq!(doc.records[0].original_text, "12:00");
    }

    #[test]
    fn description_may_follow_without_whitespace() {
        let doc = parse_document("10:00-intro");
        assert_eq!(doc.records[0].description, "-intro");
    }

    #[test]
    fn description_may_follow_without_any_separator() {
        let doc = parse_document("0:00 Start\n0:05Intro\n1:30บทนำ");
        assert_eq!(
            doc.records,
            vec![
                TimestampRecord::new(0, "0:00", "Start"),
                TimestampRecord::new(5, "0:05", "Intro"),
                TimestampRecord::new(90, "1:30", "บทนำ"),
            ]
        );
    }

    #[test]
    fn leading_token_glued_to_text_opens_first_record() {
        let doc = parse_document("2:00บทนำ\nmore");
        assert_eq!(times(&doc), vec![120]);
        assert_eq!(doc.records[0].description, "บทนำ\nmore");
    }

    #[test]
    fn overlong_leading_token_is_not_a_record() {
        let doc = parse_document("1:00 first\n12:345 not a timestamp");
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].description, "first\n12:345 not a timestamp");
    }

    #[test]
    fn mixed_formats_promote_document() {
        let doc = parse_document("0:05 a\n1:02:03 b");
        assert_eq!(doc.format, TimeFormat::Long);
        assert_eq!(times(&doc), vec![5, 3723]);
    }

    #[test]
    fn inline_timestamps_stay_in_description() {
        let doc = parse_document("0:10 see 2:15 for details");
        assert_eq!(doc.records[0].description, "see 2:15 for details");
    }

    #[test]
    fn records_keep_document_order() {
        let doc = parse_document("5:00 later\n1:00 earlier");
        assert_eq!(times(&doc), vec![300, 60]);
    }

    #[test]
    fn split_record_start_cases() {
        assert_eq!(split_record_start("1:00 a b"), Some(("1:00", "a b")));
        assert_eq!(split_record_start("1:02:03"), Some(("1:02:03", "")));
        assert_eq!(split_record_start("a 1:00"), None);
        assert_eq!(split_record_start("123:00 x"), None);
        assert_eq!(split_record_start("1:02:034 x"), None);
        assert_eq!(split_record_start("0:05Intro"), Some(("0:05", "Intro")));
    }

    #[test]
    fn parsed_document_structure() {
        let doc = parse_document("intro text\n00:00 Start\n01:02:03 Q&A\nfollow up");
        assert_eq!(
            doc,
            ParsedDoc {
                records: vec![
                    TimestampRecord::new(0, "00:00", "Start"),
                    TimestampRecord::new(3723, "01:02:03", "Q&A\nfollow up"),
                ],
                format: TimeFormat::Long,
            }
        );
    }
}
