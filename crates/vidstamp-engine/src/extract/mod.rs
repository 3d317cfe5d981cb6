//! # Text Extraction
//!
//! The inverse of [`crate::render::html`]: reads a rendered timeline fragment and
//! reconstructs canonical `"<timestamp> <description>"` text.
//!
//! Extraction is lenient. Unknown elements contribute their text, stray end
//! tags are ignored and an entry missing either its badge or its description
//! region is skipped. Inline timestamp buttons need no special handling: their
//! text content *is* the displayed timestamp.

pub mod cursor;
pub mod tokens;

use html_escape::decode_html_entities;

use crate::render::html::{BADGE_CONTAINER_CLASS, DESCRIPTION_CLASS, ENTRY_TAG, TIME_ATTR};
use tokens::{Token, is_void_element, tokenize};

/// Which part of an entry an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Other,
    Badge,
    Description,
}

struct Frame {
    name: String,
    region: Region,
}

/// Text recovered from one rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Displayed badge text, e.g. `"01:05"`.
    pub badge: String,
    /// Seconds value attached to the badge, when present and numeric.
    pub seconds: Option<u64>,
    /// Description with line breaks restored as `\n`.
    pub description: String,
}

impl ExtractedEntry {
    pub fn to_line(&self) -> String {
        if self.description.is_empty() {
            self.badge.clone()
        } else {
            format!("{} {}", self.badge, self.description)
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    badge: String,
    seconds: Option<u64>,
    description: String,
    has_badge: bool,
    has_description: bool,
}

impl EntryBuilder {
    fn finish(self) -> Option<ExtractedEntry> {
        let badge = decode_html_entities(self.badge.trim()).trim().to_string();
        if !self.has_badge || !self.has_description || badge.is_empty() {
            log::debug!("skipping rendered entry without badge or description");
            return None;
        }
        Some(ExtractedEntry {
            badge,
            seconds: self.seconds,
            description: decode_html_entities(&self.description).trim().to_string(),
        })
    }
}

/// Reads every rendered entry in document order.
pub fn extract_entries(markup: &str) -> Vec<ExtractedEntry> {
    let mut entries = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut current: Option<EntryBuilder> = None;

    for token in tokenize(markup) {
        match &token {
            Token::StartTag {
                name, self_closing, ..
            } => {
                if name == ENTRY_TAG {
                    if let Some(entry) = current.take().and_then(EntryBuilder::finish) {
                        entries.push(entry);
                    }
                    current = Some(EntryBuilder::default());
                    stack.clear();
                    stack.push(Frame {
                        name: name.clone(),
                        region: Region::Other,
                    });
                    continue;
                }

                let parent = stack.last().map_or(Region::Other, |f| f.region);
                let region = if token.has_class(BADGE_CONTAINER_CLASS) {
                    Region::Badge
                } else if token.has_class(DESCRIPTION_CLASS) {
                    Region::Description
                } else {
                    parent
                };

                if let Some(entry) = current.as_mut() {
                    match region {
                        Region::Badge => {
                            entry.has_badge = true;
                            if entry.seconds.is_none() {
                                entry.seconds = token.attr(TIME_ATTR).and_then(|v| v.parse().ok());
                            }
                        }
                        Region::Description => {
                            entry.has_description = true;
                            if name == "br" {
                                entry.description.push('\n');
                            }
                        }
                        Region::Other => {}
                    }
                }

                if !*self_closing && !is_void_element(name) {
                    stack.push(Frame {
                        name: name.clone(),
                        region,
                    });
                }
            }
            Token::EndTag { name } => {
                if let Some(depth) = stack.iter().rposition(|f| &f.name == name) {
                    stack.truncate(depth);
                }
                if name == ENTRY_TAG
                    && let Some(entry) = current.take().and_then(EntryBuilder::finish)
                {
                    entries.push(entry);
                }
            }
            Token::Text(text) => {
                let region = stack.last().map_or(Region::Other, |f| f.region);
                if let Some(entry) = current.as_mut() {
                    match region {
                        Region::Badge => entry.badge.push_str(text),
                        Region::Description => entry.description.push_str(text),
                        Region::Other => {}
                    }
                }
            }
        }
    }

    if let Some(entry) = current.take().and_then(EntryBuilder::finish) {
        entries.push(entry);
    }

    entries
}

/// Reconstructs `"<timestamp> <description>"` lines from rendered markup.
///
/// Never fails: markup that contains no recognisable entries yields `""`.
pub fn extract(markup: &str) -> String {
    extract_entries(markup)
        .iter()
        .map(ExtractedEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}
