pub mod extract;
pub mod io;
pub mod parsing;
pub mod render;
pub mod seek;
pub mod time;
pub mod youtube;

// Re-export key types for easier usage
pub use extract::{ExtractedEntry, extract, extract_entries};
pub use parsing::{ParsedDoc, TimeFormat, TimestampRecord, parse_document, parse_records};
pub use render::{Role, Segment, TimeLabel, Timeline, TimelineEntry, render};
pub use seek::{PlayerCommand, SeekDispatcher, SeekListener, SeekTarget, TargetKind};
pub use time::{FormatError, format_time, parse_time};
pub use youtube::{VideoId, VideoUrlError};
