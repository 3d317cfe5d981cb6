//! # Timeline Rendering
//!
//! Converts parsed records into a presentation-neutral [`Timeline`]. Front-ends
//! either walk the structure directly (the terminal viewer does) or serialise
//! it with [`Timeline::to_html`] and mount the fragment.
//!
//! Every timestamp that ends up on screen, whether an entry badge or an inline
//! reference inside a description, is a [`TimeLabel`] carrying both the display
//! text and the seconds value that click-to-seek consumers need.

pub mod html;

use crate::parsing::{InlineNode, ParsedDoc, TimeFormat, TimestampRecord, parse_inline};

/// One of the two alternating accent colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Secondary,
}

impl Role {
    /// Accent of the entry at `index`: secondary for even entries, primary for odd.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Secondary
        } else {
            Self::Primary
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

/// A displayed timestamp together with its machine-readable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLabel {
    pub label: String,
    pub seconds: u64,
}

impl TimeLabel {
    pub fn new(seconds: u64, format: TimeFormat) -> Self {
        Self {
            label: format.format(seconds),
            seconds,
        }
    }
}

/// Piece of a rendered description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text, unescaped.
    Text(String),
    /// A newline in the source description.
    LineBreak,
    /// An inline timestamp reference.
    Timestamp(TimeLabel),
}

/// A rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Accent for the badge, inline links and trailing separator.
    pub accent: Role,
    /// Separator drawn above the entry, absent for the first entry.
    pub separator_before: Option<Role>,
    /// Separator drawn below the entry, absent for the last entry.
    pub separator_after: Option<Role>,
    pub badge: TimeLabel,
    pub description: Vec<Segment>,
}

impl TimelineEntry {
    /// Description as plain text with inline timestamps in display form.
    pub fn description_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.description {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::LineBreak => out.push('\n'),
                Segment::Timestamp(label) => out.push_str(&label.label),
            }
        }
        out
    }

    /// Inline timestamps in the order they appear.
    pub fn inline_timestamps(&self) -> impl Iterator<Item = &TimeLabel> {
        self.description.iter().filter_map(|segment| match segment {
            Segment::Timestamp(label) => Some(label),
            _ => None,
        })
    }

    /// Canonical `"<timestamp> <description>"` line(s) for this entry.
    pub fn to_text(&self) -> String {
        let description = self.description_text();
        let description = description.trim();
        if description.is_empty() {
            self.badge.label.clone()
        } else {
            format!("{} {}", self.badge.label, description)
        }
    }
}

/// Rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub format: TimeFormat,
    pub entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn from_doc(doc: &ParsedDoc) -> Self {
        render(&doc.records, doc.format)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Plain-text form, equivalent to extracting text from [`Timeline::to_html`].
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(TimelineEntry::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders records in document order using one display format for all of them.
pub fn render(records: &[TimestampRecord], format: TimeFormat) -> Timeline {
    let total = records.len();
    let entries = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let accent = Role::for_index(index);
            TimelineEntry {
                accent,
                separator_before: (index > 0).then(|| Role::for_index(index - 1)),
                separator_after: (index + 1 < total).then_some(accent),
                badge: TimeLabel::new(record.time, format),
                description: render_description(&record.description, format),
            }
        })
        .collect();

    Timeline { format, entries }
}

fn render_description(description: &str, format: TimeFormat) -> Vec<Segment> {
    let mut segments = Vec::new();

    for (line_index, line) in description.split('\n').enumerate() {
        if line_index > 0 {
            segments.push(Segment::LineBreak);
        }
        for node in parse_inline(line) {
            segments.push(match node {
                InlineNode::Text(span) => Segment::Text(span.slice(line).to_string()),
                InlineNode::Timestamp { seconds, .. } => {
                    Segment::Timestamp(TimeLabel::new(seconds, format))
                }
            });
        }
    }

    segments
}
