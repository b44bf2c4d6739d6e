use serde::Deserialize;

/// Client credentials grant response
#[derive(Deserialize)]
pub struct AccessToken {
    pub(in crate::spotify) access_token: String,
    pub(in crate::spotify) token_type: String,
}

#[derive(Deserialize)]
pub struct Track {
    pub(in crate::spotify) id: String,
    pub(in crate::spotify) name: String,
    /// Credited artists, primary artist first
    pub(in crate::spotify) artists: Vec<SimplifiedArtist>,
}

#[derive(Deserialize)]
pub struct SimplifiedArtist {
    pub(in crate::spotify) name: String,
}
