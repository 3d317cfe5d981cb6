//! # Click-to-Seek
//!
//! The timeline only *exposes* seekable positions; it never moves a player.
//! Front-ends turn a user action into a [`SeekTarget`] and hand it to a
//! [`SeekDispatcher`], which notifies whoever subscribed (an embedded player
//! bridge, a status line, a test probe).

use serde::Serialize;

use crate::render::{TimeLabel, Timeline};

/// Where in an entry a seek target was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// The entry's own timestamp.
    Badge,
    /// The nth (0-based) inline timestamp in the entry's description.
    Inline(usize),
}

/// A clickable position on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekTarget {
    pub entry: usize,
    pub kind: TargetKind,
    pub seconds: u64,
    pub label: String,
}

impl SeekTarget {
    fn new(entry: usize, kind: TargetKind, label: &TimeLabel) -> Self {
        Self {
            entry,
            kind,
            seconds: label.seconds,
            label: label.label.clone(),
        }
    }
}

impl Timeline {
    /// All seekable positions: each badge followed by its inline timestamps.
    pub fn seek_targets(&self) -> Vec<SeekTarget> {
        let mut targets = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            targets.push(SeekTarget::new(index, TargetKind::Badge, &entry.badge));
            for (n, label) in entry.inline_timestamps().enumerate() {
                targets.push(SeekTarget::new(index, TargetKind::Inline(n), label));
            }
        }
        targets
    }

    /// Looks up one target, e.g. for a key press or a click on a known element.
    pub fn seek_target(&self, entry: usize, kind: TargetKind) -> Option<SeekTarget> {
        let timeline_entry = self.entries.get(entry)?;
        let label = match kind {
            TargetKind::Badge => &timeline_entry.badge,
            TargetKind::Inline(n) => timeline_entry.inline_timestamps().nth(n)?,
        };
        Some(SeekTarget::new(entry, kind, label))
    }
}

/// Receives seek requests.
pub trait SeekListener {
    fn on_seek(&mut self, target: &SeekTarget);
}

impl<F> SeekListener for F
where
    F: FnMut(&SeekTarget),
{
    fn on_seek(&mut self, target: &SeekTarget) {
        self(target)
    }
}

/// Fans seek requests out to subscribed listeners in subscription order.
#[derive(Default)]
pub struct SeekDispatcher {
    listeners: Vec<Box<dyn SeekListener + Send>>,
}

impl SeekDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl SeekListener + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn dispatch(&mut self, target: &SeekTarget) {
        log::debug!("seek to {} ({}s)", target.label, target.seconds);
        for listener in &mut self.listeners {
            listener.on_seek(target);
        }
    }
}

/// Message posted to an embedded player iframe.
///
/// Serialises to `{"event":"command","func":"seekTo","args":[135,true]}`;
/// the trailing `true` lets the player seek past buffered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCommand {
    event: &'static str,
    func: &'static str,
    args: (u64, bool),
}

impl PlayerCommand {
    pub fn seek_to(seconds: u64) -> Self {
        Self {
            event: "command",
            func: "seekTo",
            args: (seconds, true),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
