use anyhow::Result;
use reqwest::header;

use crate::youtube_music::{api_types, custom_types};

const BASE_URL: &str = "https://music.youtube.com/";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
/// Search filter restricting results to songs
const SONGS_FILTER_PARAMS: &str = "Eg-KAQwIARAAGAAgACgAMABqChAEEAMQCRAFEAo%3D";

pub struct Client {
    client: reqwest::Client,
    base_url: String,
    config: api_types::SessionConfig,
}

impl Client {
    /// Loads the web app once to pick up the API key and client version for later requests
    pub async fn initialize() -> Result<Self> {
        Self::initialize_at(BASE_URL).await
    }

    pub(crate) async fn initialize_at(base_url: &str) -> Result<Self> {
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        let headers = {
            let mut headers = header::HeaderMap::new();
            headers.insert(
                header::ACCEPT_LANGUAGE,
                header::HeaderValue::from_static("en-US,en;q=0.5"),
            );
            // Skips the EU cookie consent interstitial
            headers.insert(header::COOKIE, header::HeaderValue::from_static("SOCS=CAI"));
            headers.insert("x-origin", header::HeaderValue::from_str(&base_url)?);
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        let html = client
            .get(&base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let config = api_types::SessionConfig::from_html(&html)?;
        tracing::debug!(
            client_version = %config.client_version,
            language = %config.language,
            region = %config.region,
            "initialized YouTube Music session",
        );
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub async fn search_songs(&self, query: &str) -> Result<Vec<custom_types::Song>> {
        let mut request = self
            .client
            .post(format!(
                "{}youtubei/v1/search?alt=json&prettyPrint=false&key={}",
                self.base_url, self.config.api_key,
            ))
            .header("X-YouTube-Client-Version", &self.config.client_version)
            .json(&api_types::SearchRequest::new(
                &self.config,
                query,
                SONGS_FILTER_PARAMS,
            ));
        if let Some(client_name) = self.config.client_name_header() {
            request = request.header("X-YouTube-Client-Name", client_name);
        }
        if let Some(visitor_data) = &self.config.visitor_data {
            request = request.header("X-Goog-Visitor-Id", visitor_data);
        }

        let response: serde_json::Value = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let songs = custom_types::songs_from_search_response(&response);
        tracing::debug!(query, results = songs.len(), "searched YouTube Music songs");
        Ok(songs)
    }
}
