use anyhow::{Result, ensure};
use reqwest::{StatusCode, header};

use crate::spotify::{TrackId, api_types};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";

pub struct Client {
    client: reqwest::Client,
    api_base_url: String,
}

impl Client {
    /// Runs the client credentials grant and returns a client carrying the access token
    pub async fn authenticate(client_id: &str, client_secret: &str) -> Result<Self> {
        Self::authenticate_at(TOKEN_URL, API_BASE_URL, client_id, client_secret).await
    }

    pub(crate) async fn authenticate_at(
        token_url: &str,
        api_base_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self> {
        let token: api_types::AccessToken = reqwest::Client::new()
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        ensure!(
            token.token_type.eq_ignore_ascii_case("bearer"),
            "unexpected token type: {}",
            token.token_type,
        );
        tracing::debug!("authenticated with Spotify");
        Self::with_token(&token.access_token, api_base_url)
    }

    /// Client for an already issued access token
    pub(crate) fn with_token(access_token: &str, api_base_url: &str) -> Result<Self> {
        let headers = {
            let mut headers = header::HeaderMap::new();
            let mut authorization: header::HeaderValue =
                format!("Bearer {access_token}").try_into()?;
            authorization.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, authorization);
            headers.insert(
                header::ACCEPT,
                header::HeaderValue::from_static("application/json"),
            );
            headers
        };
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// `None` if Spotify has no track with this ID
    pub async fn get_track(&self, track_id: &TrackId) -> Result<Option<api_types::Track>> {
        let response = self
            .client
            .get(format!("{}/tracks/{}", self.api_base_url, track_id.as_str()))
            .send()
            .await?;
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
        ) {
            tracing::debug!(%track_id, status = %response.status(), "track lookup found nothing");
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    const ID: &str = "6rqhFgbbKwnb9MLmUQDhG6";

    fn track_path() -> String {
        format!("/tracks/{ID}")
    }

    #[tokio::test]
    async fn test_authenticate_client_credentials() {
        let mut server = mockito::Server::new_async().await;
        // base64("id:secret")
        let token_mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", "Basic aWQ6c2VjcmV0")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("grant_type=client_credentials")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"token123","token_type":"Bearer","expires_in":3600}"#)
            .create_async()
            .await;
        let track_mock = server
            .mock("GET", track_path().as_str())
            .match_header("authorization", "Bearer token123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"id":"{ID}","name":"Song","artists":[{{"name":"Artist A"}}]}}"#
            ))
            .create_async()
            .await;

        let token_url = format!("{}/api/token", server.url());
        let client = Client::authenticate_at(&token_url, &server.url(), "id", "secret")
            .await
            .unwrap();
        let track = client
            .get_track(&TrackId::parse(ID).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(track.name, "Song");
        token_mock.assert_async().await;
        track_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_token_type() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"token123","token_type":"mac"}"#)
            .create_async()
            .await;
        let token_url = format!("{}/api/token", server.url());
        let result = Client::authenticate_at(&token_url, &server.url(), "id", "secret").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_authenticate_rejected_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_client"}"#)
            .create_async()
            .await;
        let token_url = format!("{}/api/token", server.url());
        let result = Client::authenticate_at(&token_url, &server.url(), "id", "wrong").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_track_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", track_path().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"id":"{ID}","name":"Song","artists":[{{"name":"Artist A"}},{{"name":"Artist B"}}],"popularity":50}}"#
            ))
            .create_async()
            .await;
        let client = Client::with_token("token123", &server.url()).unwrap();
        let track = client
            .get_track(&TrackId::parse(ID).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(track.id, ID);
        assert_eq!(track.artists.len(), 2);
        assert_eq!(track.artists[0].name, "Artist A");
    }

    #[tokio::test]
    async fn test_get_track_not_found_and_bad_request_are_none() {
        for status in [404, 400] {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("GET", track_path().as_str())
                .with_status(status)
                .with_body(r#"{"error":{"status":404,"message":"Non existing id"}}"#)
                .create_async()
                .await;
            let client = Client::with_token("token123", &server.url()).unwrap();
            let track = client.get_track(&TrackId::parse(ID).unwrap()).await.unwrap();
            assert!(track.is_none(), "status {status}");
        }
    }

    #[tokio::test]
    async fn test_get_track_server_error_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/tracks/".to_owned()))
            .with_status(500)
            .create_async()
            .await;
        let client = Client::with_token("token123", &server.url()).unwrap();
        let result = client.get_track(&TrackId::parse(ID).unwrap()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_track_undecodable_payload_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", track_path().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;
        let client = Client::with_token("token123", &server.url()).unwrap();
        let result = client.get_track(&TrackId::parse(ID).unwrap()).await;
        assert!(result.is_err());
    }
}
