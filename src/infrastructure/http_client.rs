// HTTP transport for the ice-data backend
use crate::application::error::ApiError;
use crate::application::session::CredentialProvider;
use crate::infrastructure::config::ApiSettings;
use anyhow::Context;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Configured client shared by every backend call.
///
/// Attaches `Authorization: Bearer <token>` whenever the credential provider
/// has a token, and normalizes every failure into an [`ApiError`] before it
/// leaves this type.
#[derive(Clone)]
pub struct TransportClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl TransportClient {
    pub fn new(settings: &ApiSettings, credentials: Arc<dyn CredentialProvider>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value, ApiError> {
        self.execute(Method::GET, path, |r| r.query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.execute(Method::POST, path, |r| r.json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.execute(Method::PUT, path, |r| r.json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.execute(Method::DELETE, path, |r| r).await
    }

    async fn execute<F>(&self, method: Method, path: &str, build: F) -> Result<Value, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        let mut request = build(self.client.request(method.clone(), &url));

        // Token is read per request so login/logout take effect immediately
        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| normalize_transport_error(&method, &url, e))?;

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            // A failing status already arrived; report it rather than a lost connection
            Err(e) if !status.is_success() && !e.is_timeout() => {
                let err = ApiError::from_status(status.as_u16(), None);
                tracing::error!("{} {} failed with status {}: {} ({})", method, url, status, err, e);
                return Err(err);
            }
            Err(e) => return Err(normalize_transport_error(&method, &url, e)),
        };
        let body = parse_body(&bytes);

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), body.as_ref());
            tracing::error!("{} {} failed with status {}: {}", method, url, status, err);
            return Err(err);
        }

        tracing::debug!("{} {} -> {}", method, url, status);
        Ok(body.unwrap_or(Value::Null))
    }
}

/// JSON when possible, otherwise the raw text as a string value
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned())),
    )
}

fn normalize_transport_error(method: &Method, url: &str, err: reqwest::Error) -> ApiError {
    let normalized = if err.is_timeout() {
        ApiError::Timeout
    } else if let Some(status) = err.status() {
        ApiError::from_status(status.as_u16(), None)
    } else {
        ApiError::Network
    };

    tracing::error!("{} {} failed: {} ({})", method, url, normalized, err);
    normalized
}
