use anyhow::{Result, ensure};

use crate::spotify::{TrackId, api_types};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    name: String,
    /// Never empty
    artists: Vec<String>,
}

impl SourceTrack {
    pub fn new(name: String, artists: Vec<String>) -> Result<Self> {
        ensure!(!artists.is_empty(), "track \"{name}\" has no artists");
        Ok(Self { name, artists })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn primary_artist(&self) -> &str {
        &self.artists[0]
    }
}

impl TryFrom<api_types::Track> for SourceTrack {
    type Error = anyhow::Error;

    fn try_from(value: api_types::Track) -> Result<Self, Self::Error> {
        ensure!(
            TrackId::parse(&value.id).is_some(),
            "unexpected track ID in response: {}",
            value.id,
        );
        Self::new(
            value.name,
            value.artists.into_iter().map(|artist| artist.name).collect(),
        )
    }
}
