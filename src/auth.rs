use thiserror::Error;

use crate::matching::{self, MatchError, MatchResult};
use crate::{spotify, youtube_music};

pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Authenticated clients for both services, ready to link tracks
pub struct Clients {
    pub spotify: spotify::Client,
    pub ytmusic: youtube_music::Client,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no Spotify client ID provided")]
    MissingClientId,
    #[error("no Spotify client secret provided")]
    MissingClientSecret,
    #[error("failed to authenticate with Spotify")]
    Spotify(#[source] anyhow::Error),
    #[error("failed to initialize YouTube Music")]
    YouTubeMusic(#[source] anyhow::Error),
}

impl Credentials {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::MissingClientId);
        }
        if self.client_secret.trim().is_empty() {
            return Err(AuthError::MissingClientSecret);
        }
        Ok(())
    }
}

pub async fn auth(credentials: &Credentials) -> Result<Clients, AuthError> {
    credentials.validate()?;

    let spotify = spotify::Client::authenticate(&credentials.client_id, &credentials.client_secret)
        .await
        .map_err(AuthError::Spotify)?;
    let ytmusic = youtube_music::Client::initialize()
        .await
        .map_err(AuthError::YouTubeMusic)?;
    Ok(Clients { spotify, ytmusic })
}

impl Clients {
    pub async fn get_song(&self, input: &str) -> Result<MatchResult, MatchError> {
        matching::get_song(input, &self.spotify, &self.ytmusic).await
    }
}
