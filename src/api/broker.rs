//! Client for the first-party vap.cx API: issues the music API token and
//! serves data files.

use reqwest::Method;
use serde::Deserialize;

use super::client::{ApiClient, ApiError};

const BROKER_BASE_URL: &str = "https://api.vap.cx";

/// Access token issued by the broker for the music API.
///
/// The broker may answer with a null token when it has none to hand out.
#[derive(Debug, Deserialize)]
pub struct SpotifyToken {
    pub token: Option<String>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
}

/// Client for the token broker and its data endpoints.
#[derive(Clone)]
pub struct BrokerClient {
    api: ApiClient,
}

impl BrokerClient {
    pub fn new() -> Self {
        Self {
            api: ApiClient::new(BROKER_BASE_URL),
        }
    }

    /// Client pointed at a non-default broker, for dev servers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(base_url),
        }
    }

    pub async fn get_spotify_token(&self) -> Result<SpotifyToken, ApiError> {
        self.api.request_body(Method::GET, "/spotify-token", None).await
    }

    pub async fn get_data(&self, file_path: &str) -> Result<serde_json::Value, ApiError> {
        self.api
            .request_body(Method::GET, &format!("/data{file_path}"), None)
            .await
    }

    pub async fn get_multi_data(
        &self,
        path: &str,
        files: &[&str],
    ) -> Result<serde_json::Value, ApiError> {
        self.api
            .request_body(Method::GET, &multi_data_path(path, files), None)
            .await
    }
}

impl Default for BrokerClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `/multi-data` path with one `files[]` query parameter per file.
fn multi_data_path(path: &str, files: &[&str]) -> String {
    let query = files
        .iter()
        .map(|file| format!("files[]={}", urlencoding::encode(file)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/multi-data{path}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::serve_once;

    #[test]
    fn multi_data_path_repeats_files_param() {
        assert_eq!(
            multi_data_path("/mixes", &["a", "b c"]),
            "/multi-data/mixes?files[]=a&files[]=b%20c"
        );
    }

    #[test]
    fn parse_token_response() {
        let json = r#"{"token": "abc", "type": "Bearer"}"#;
        let token: SpotifyToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.token.as_deref(), Some("abc"));
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn parse_null_token_response() {
        let json = r#"{"token": null, "type": null}"#;
        let token: SpotifyToken = serde_json::from_str(json).unwrap();
        assert!(token.token.is_none());
        assert!(token.token_type.is_none());
    }

    #[tokio::test]
    async fn get_spotify_token_hits_the_token_endpoint() {
        let (base_url, server) = serve_once("200 OK", r#"{"token":"abc","type":"Bearer"}"#).await;
        let broker = BrokerClient::with_base_url(base_url);

        let token = broker.get_spotify_token().await.unwrap();
        assert_eq!(token.token.as_deref(), Some("abc"));
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /spotify-token HTTP/1.1\r\n"));
    }
}
