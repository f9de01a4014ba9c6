//! Authenticated request helper shared by the broker and music API clients.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tokio::sync::{RwLock, broadcast};

/// Events emitted by an [`ApiClient`] when its state changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// The credential was replaced via [`ApiClient::set_token`].
    TokenUpdated,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Issues HTTP requests against a fixed base URL, attaching the current
/// credential as an `Authorization` header when one is set.
///
/// A request either succeeds with a response or fails with a single
/// [`ApiError`]; there is no separate error channel.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    http: reqwest::Client,
    event_tx: broadcast::Sender<ClientEvent>,
}

fn format_token(value: &str, scheme: Option<&str>) -> String {
    match scheme {
        Some(scheme) => format!("{scheme} {value}"),
        None => value.to_string(),
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            http: reqwest::Client::new(),
            event_tx,
        }
    }

    /// Client carrying an initial credential.
    pub fn with_token(base_url: impl Into<String>, value: &str, scheme: Option<&str>) -> Self {
        let mut client = Self::new(base_url);
        client.token = Arc::new(RwLock::new(Some(format_token(value, scheme))));
        client
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Store the credential, prefixed with the scheme label when one is
    /// given, and notify subscribers.
    pub async fn set_token(&self, value: &str, scheme: Option<&str>) {
        *self.token.write().await = Some(format_token(value, scheme));
        // No subscribers yet is fine, the send result is irrelevant
        let _ = self.event_tx.send(ClientEvent::TokenUpdated);
        tracing::debug!(base_url = %self.base_url, "token updated");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.event_tx.subscribe()
    }

    /// Issue a request to `base_url + path`.
    ///
    /// A missing credential is not an error; the request simply goes out
    /// without an `Authorization` header and the server decides.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    /// Issue a request and decode the JSON response body.
    pub async fn request_body<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        Ok(self.request(method, path, body).await?.json().await?)
    }
}
