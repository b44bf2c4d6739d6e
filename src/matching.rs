use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::spotify::{self, TrackId, custom_types::SourceTrack};
use crate::youtube_music::{self, custom_types::Song};

/// Looks up tracks on the service the link comes from
#[async_trait]
pub trait TrackSource: Sync {
    /// `Ok(None)` if the service has no track with this ID
    async fn get_track(&self, track_id: &TrackId) -> Result<Option<SourceTrack>>;
}

/// Free-text song search on the service the link goes to
#[async_trait]
pub trait SongSearch: Sync {
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>>;
}

#[async_trait]
impl TrackSource for spotify::Client {
    async fn get_track(&self, track_id: &TrackId) -> Result<Option<SourceTrack>> {
        self.get_track(track_id)
            .await?
            .map(SourceTrack::try_from)
            .transpose()
    }
}

#[async_trait]
impl SongSearch for youtube_music::Client {
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        self.search_songs(query).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Playable URL of the matched song
    Found(String),
    NotFound(NotFoundReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// No search result is credited to the primary artist
    NoArtistMatch,
    /// The search did not complete, see the logged diagnostic
    SearchFailed,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("no Spotify track provided")]
    MissingTrackId,
    #[error("invalid Spotify track ID: {0}")]
    InvalidTrackId(String),
    #[error("no Spotify track found for ID {0}")]
    TrackNotFound(TrackId),
    #[error("failed to look up Spotify track")]
    SourceLookup(#[source] anyhow::Error),
}

/// Normalizes `input` and links it to a YouTube Music song
pub async fn get_song(
    input: &str,
    source: &impl TrackSource,
    target: &impl SongSearch,
) -> Result<MatchResult, MatchError> {
    if input.is_empty() {
        return Err(MatchError::MissingTrackId);
    }
    let track_id = spotify::normalize_track_id(input)
        .ok_or_else(|| MatchError::InvalidTrackId(input.to_owned()))?;
    find_song(&track_id, source, target).await
}

pub async fn find_song(
    track_id: &TrackId,
    source: &impl TrackSource,
    target: &impl SongSearch,
) -> Result<MatchResult, MatchError> {
    let track = source
        .get_track(track_id)
        .await
        .map_err(MatchError::SourceLookup)?
        .ok_or_else(|| MatchError::TrackNotFound(track_id.clone()))?;

    let query = search_query(&track);
    let songs = match target.search_songs(&query).await {
        Ok(songs) => songs,
        Err(err) => {
            tracing::warn!(track = track.name(), error = %format!("{err:#}"), "song search failed");
            return Ok(MatchResult::NotFound(NotFoundReason::SearchFailed));
        }
    };

    let matches = filter_by_primary_artist(&songs, track.primary_artist());
    let Some(song) = matches.first() else {
        tracing::info!(
            track = track.name(),
            artist = track.primary_artist(),
            results = songs.len(),
            "no search result by primary artist",
        );
        return Ok(MatchResult::NotFound(NotFoundReason::NoArtistMatch));
    };
    tracing::debug!(
        %track_id,
        video_id = %song.video_id,
        title = %song.name,
        artist_id = ?song.artist.as_ref().and_then(|artist| artist.artist_id.as_deref()),
        "matched song",
    );
    Ok(MatchResult::Found(youtube_music::watch_url(&song.video_id)))
}

/// Title followed by all artists
pub fn search_query(track: &SourceTrack) -> String {
    let mut query = track.name().to_owned();
    for artist in track.artists() {
        query.push(' ');
        query.push_str(artist);
    }
    query
}

/// Exact, case-sensitive artist comparison. Search order is kept.
pub fn filter_by_primary_artist<'a>(songs: &'a [Song], primary_artist: &str) -> Vec<&'a Song> {
    songs
        .iter()
        .filter(|song| song.artist_name() == Some(primary_artist))
        .collect()
}
