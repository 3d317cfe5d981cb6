use serde::Serialize;

use super::record::TimestampRecord;
use crate::time::{SECONDS_PER_HOUR, format_time, has_hour_field};

/// Display format chosen once per document and applied to every timestamp in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `MM:SS`
    #[default]
    Short,
    /// `HH:MM:SS`
    Long,
}

impl TimeFormat {
    /// Chooses the format for a whole document.
    ///
    /// Long wins as soon as one record reaches an hour or was written with an
    /// hour field (`"00:01:30"`), so mixed documents display uniformly.
    pub fn decide(records: &[TimestampRecord]) -> Self {
        let long = records
            .iter()
            .any(|r| r.time >= SECONDS_PER_HOUR || has_hour_field(&r.original_text));
        if long { Self::Long } else { Self::Short }
    }

    pub fn is_long(self) -> bool {
        matches!(self, Self::Long)
    }

    /// Formats `seconds` in this format. Values of an hour or more always
    /// carry an hour field, even in [`TimeFormat::Short`].
    pub fn format(self, seconds: u64) -> String {
        format_time(seconds, self.is_long())
    }
}
