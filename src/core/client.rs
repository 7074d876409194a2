//! HTTP transport for the KiotViet public API.
//!
//! Every request carries the `Retailer`, `Authorization: Bearer` and
//! `Content-Type: application/json` headers. One call is one round trip: no
//! retries, no backoff. The connection pool is created on the first request
//! and kept until [`KiotVietClient::close`].

use crate::domain::model::{ApiRequest, Credentials, Method, WireParams};
use crate::domain::ports::{ApiTransport, ConfigProvider};
use crate::utils::error::{KiotVietError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://public.kiotapi.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const RETAILER_HEADER: HeaderName = HeaderName::from_static("retailer");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(
            config.base_url(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }
}

pub struct KiotVietClient {
    credentials: Credentials,
    settings: ClientSettings,
    http: Mutex<Option<Client>>,
}

impl KiotVietClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_settings(credentials, ClientSettings::default())
    }

    pub fn with_settings(credentials: Credentials, settings: ClientSettings) -> Self {
        let settings = ClientSettings::new(settings.base_url, settings.timeout);
        Self {
            credentials,
            settings,
            http: Mutex::new(None),
        }
    }

    pub fn retailer(&self) -> &str {
        &self.credentials.retailer
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Whether a connection pool is currently held.
    pub fn is_connected(&self) -> bool {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub async fn get(&self, path: &str, params: Option<&WireParams>) -> Result<Value> {
        let response = self.send(Method::Get, path, params, None).await?;
        Self::parse_json(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self.send(Method::Post, path, None, Some(body)).await?;
        Self::parse_json(response).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self.send(Method::Put, path, None, Some(body)).await?;
        Self::parse_json(response).await
    }

    /// An empty response body is reported as `{"message": "success"}`.
    pub async fn delete(&self, path: &str, params: Option<&WireParams>) -> Result<Value> {
        let response = self.send(Method::Delete, path, params, None).await?;
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(json!({ "message": "success" }));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Drops the connection pool. A later request opens a new one.
    pub fn close(&self) {
        let released = self
            .http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if released.is_some() {
            tracing::debug!("Closed HTTP client for retailer {}", self.credentials.retailer);
        }
    }

    fn http_client(&self) -> Result<Client> {
        let mut guard = self.http.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        tracing::debug!(
            "Creating HTTP client for retailer {} (timeout {:?})",
            self.credentials.retailer,
            self.settings.timeout
        );
        let client = Client::builder().timeout(self.settings.timeout).build()?;
        *guard = Some(client.clone());
        Ok(client)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let retailer = HeaderValue::from_str(&self.credentials.retailer).map_err(|_| {
            KiotVietError::invalid_argument("retailer contains characters not allowed in a header")
        })?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.credentials.access_token))
            .map_err(|_| {
                KiotVietError::invalid_argument(
                    "access_token contains characters not allowed in a header",
                )
            })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(RETAILER_HEADER, retailer);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<&WireParams>,
        body: Option<&Value>,
    ) -> Result<Response> {
        let headers = self.headers()?;
        let client = self.http_client()?;
        let url = format!("{}{}", self.settings.base_url, path);

        let mut request = match method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
            Method::Put => client.put(&url),
            Method::Delete => client.delete(&url),
        }
        .headers(headers);

        if let Some(params) = params {
            request = request.query(&params.to_query_pairs());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", method, path);
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("KiotViet API error: {} {} returned {}", method, path, status);
            return Err(KiotVietError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn parse_json(response: Response) -> Result<Value> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ApiTransport for KiotVietClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let empty = json!({});
        match request.method {
            Method::Get => self.get(&request.path, request.params.as_ref()).await,
            Method::Post => {
                self.post(&request.path, request.body.as_ref().unwrap_or(&empty))
                    .await
            }
            Method::Put => {
                self.put(&request.path, request.body.as_ref().unwrap_or(&empty))
                    .await
            }
            Method::Delete => self.delete(&request.path, request.params.as_ref()).await,
        }
    }
}
