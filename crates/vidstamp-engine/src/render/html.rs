//! HTML fragment serialisation for [`Timeline`].
//!
//! The fragment is a sequence of `<li>` elements meant to be mounted inside a
//! `<ul class="timeline">` container owned by the page. Class names are shared
//! with [`crate::extract`], which reads the same fragment back.

use html_escape::encode_text;

use super::{Role, Segment, TimeLabel, Timeline, TimelineEntry};

pub const ENTRY_TAG: &str = "li";
pub const BADGE_CONTAINER_CLASS: &str = "timeline-middle";
pub const DESCRIPTION_CLASS: &str = "timeline-description";
pub const TIME_LINK_CLASS: &str = "timestamp-link";
pub const TIME_ATTR: &str = "data-time";

impl Timeline {
    /// Serialises the timeline as an HTML fragment.
    ///
    /// Every element carrying [`TIME_ATTR`] also has [`TIME_LINK_CLASS`], so a
    /// page can wire click-to-seek with a single selector.
    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(entry_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn entry_html(entry: &TimelineEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("<{ENTRY_TAG} class=\"timeline-entry\">\n"));
    if let Some(role) = entry.separator_before {
        out.push_str(&separator_html(role));
    }
    out.push_str(&format!(
        "<div class=\"{BADGE_CONTAINER_CLASS}\">{}</div>\n",
        badge_html(&entry.badge, entry.accent)
    ));
    out.push_str(&format!(
        "<div class=\"timeline-end timeline-box\"><div class=\"{DESCRIPTION_CLASS}\">{}</div></div>\n",
        description_html(&entry.description, entry.accent)
    ));
    if let Some(role) = entry.separator_after {
        out.push_str(&separator_html(role));
    }
    out.push_str(&format!("</{ENTRY_TAG}>"));
    out
}

fn separator_html(role: Role) -> String {
    format!("<hr class=\"bg-{}\" />\n", role.as_str())
}

fn badge_html(badge: &TimeLabel, role: Role) -> String {
    format!(
        "<div class=\"btn btn-{} btn-sm {TIME_LINK_CLASS}\" {TIME_ATTR}=\"{}\">{}</div>",
        role.as_str(),
        badge.seconds,
        encode_text(&badge.label)
    )
}

fn description_html(segments: &[Segment], role: Role) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(&encode_text(text)),
            Segment::LineBreak => out.push_str("<br>"),
            Segment::Timestamp(label) => out.push_str(&format!(
                "<button class=\"btn btn-xs btn-{} {TIME_LINK_CLASS}\" {TIME_ATTR}=\"{}\">{}</button>",
                role.as_str(),
                label.seconds,
                encode_text(&label.label)
            )),
        }
    }
    out
}
