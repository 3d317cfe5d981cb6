use serde::Serialize;

/// One parsed timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampRecord {
    /// Offset into the video in whole seconds.
    pub time: u64,
    /// Free text following the timestamp. Continuation lines are joined with `\n`.
    pub description: String,
    /// The timestamp token exactly as written (`"1:23:45"`, `"83:45"`).
    ///
    /// Only consulted when choosing the document's display format.
    pub original_text: String,
}

impl TimestampRecord {
    pub fn new(time: u64, original_text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            time,
            description: description.into(),
            original_text: original_text.into(),
        }
    }
}
