//! # Video URLs
//!
//! Recognising YouTube links, pulling out the 11-character video id and
//! building the URLs the front-end needs (watch page, embeddable player,
//! oEmbed metadata). Also holds the payload types exchanged with the
//! timestamp-generation backend and the oEmbed endpoint. No network access
//! happens here.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VIDEO_ID_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VideoUrlError {
    #[error("Invalid YouTube URL or ID: {input}")]
    InvalidUrl { input: String },
}

/// An 11-character YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wraps `id` if it has the shape of a video id.
    pub fn parse(id: &str) -> Option<Self> {
        is_video_id(id).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Player URL with the JS API enabled so the page can post seek commands.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?enablejsapi=1", self.0)
    }

    pub fn oembed_url(&self) -> String {
        format!(
            "https://www.youtube.com/oembed?url={}&format=json",
            urlencoding::encode(&self.watch_url())
        )
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^https?://(?:(?:www\.|m\.)?youtube\.com/(?:watch\?v=|embed/|v/|playlist\?list=)|(?:www\.)?youtu\.be/)[a-zA-Z0-9_-]+(?:[?&].*)?$",
        )
        .expect("Invalid YouTube URL regex")
    })
}

fn link_id_regex() -> &'static Regex {
    static LINK_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_ID_REGEX
        .get_or_init(|| Regex::new(r"(?:v=|embed/|youtu\.be/)([^&?]+)").expect("Invalid id regex"))
}

fn strict_id_regex() -> &'static Regex {
    static STRICT_ID_REGEX: OnceLock<Regex> = OnceLock::new();
    STRICT_ID_REGEX.get_or_init(|| {
        Regex::new(r"(?:v=|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("Invalid strict id regex")
    })
}

/// True for watch, embed, `/v/`, playlist and `youtu.be` links.
pub fn validate_url(url: &str) -> bool {
    url_regex().is_match(url)
}

/// Video id from a link typed into the URL box.
///
/// Returns `None` unless the link validates and carries an 11-character id;
/// playlist links therefore yield nothing.
pub fn video_id_from_url(url: &str) -> Option<VideoId> {
    if !validate_url(url) {
        return None;
    }
    let caps = link_id_regex().captures(url)?;
    VideoId::parse(caps.get(1)?.as_str())
}

/// Accepts either a bare video id or any string containing `v=<id>` /
/// `youtu.be/<id>`.
pub fn extract_video_id(url_or_id: &str) -> Result<VideoId, VideoUrlError> {
    let input = url_or_id.trim();
    if let Some(id) = VideoId::parse(input) {
        return Ok(id);
    }
    strict_id_regex()
        .captures(input)
        .and_then(|caps| VideoId::parse(caps.get(1)?.as_str()))
        .ok_or_else(|| VideoUrlError::InvalidUrl {
            input: input.to_string(),
        })
}

/// Video metadata as returned by the oEmbed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoDetails {
    pub title: String,
    pub author_name: String,
    pub author_url: String,
    pub thumbnail_url: String,
}

/// Body of a timestamp-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub url: String,
    pub additional_instruction: String,
    pub language: String,
}
