mod api_types;
mod client;
pub mod custom_types;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub use client::Client;

/// Length of a Spotify track ID
const TRACK_ID_LEN: usize = 22;

/// Track reference forms, in priority order. The first capture group is the ID.
static TRACK_REFERENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // spotify:track:6rqhFgbbKwnb9MLmUQDhG6
        Regex::new(r"^spotify:track:(.+)$").unwrap(),
        // https://open.spotify.com/track/6rqhFgbbKwnb9MLmUQDhG6?si=...
        Regex::new(r"^https?://open\.spotify\.com/track/([^?]+)").unwrap(),
        // https://api.spotify.com/v1/tracks/6rqhFgbbKwnb9MLmUQDhG6
        Regex::new(r"^https?://api\.spotify\.com/v1/tracks/([^?]+)").unwrap(),
    ]
});

/// A validated Spotify track ID: exactly 22 base62 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    /// Accepts only a bare, already canonical ID
    pub fn parse(id: &str) -> Option<Self> {
        is_valid_track_id(id).then(|| Self(id.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_track_id(id: &str) -> bool {
    id.len() == TRACK_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Extracts the track ID from a URI, web URL, API URL or bare ID.
///
/// Query parameters are dropped. Returns `None` if nothing that looks like a
/// track ID is left over.
pub fn normalize_track_id(input: &str) -> Option<TrackId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let extracted = TRACK_REFERENCE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(trimmed))
        .and_then(|captures| captures.get(1))
        .map_or(trimmed, |id| id.as_str());
    let candidate = extracted
        .split_once('?')
        .map_or(extracted, |(id, _query)| id);

    let track_id = TrackId::parse(candidate);
    if track_id.is_none() {
        tracing::warn!(input, track_id = candidate, "invalid Spotify track ID");
    }
    track_id
}
