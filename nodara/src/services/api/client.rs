//! # API Client
//!
//! JSON helper for the Nodara REST API.
//!
//! Every call resolves to an [`ApiResponse`]: a 2xx body is wrapped as
//! `{ data, success: true }`; anything else becomes `success: false` with the
//! server's `message` field, `HTTP <code>: <reason>`, or the transport error.
//! Nothing is thrown past this layer; endpoint modules call
//! [`ApiResponse::into_result`] to get a `Result<T, String>`.

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiResponse, ErrorBody};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;

/// HTTP client for the Nodara REST API.
///
/// Default headers live behind a lock so a token can be set or cleared
/// through a shared reference.
pub struct ApiClient {
    client: Client,
    base_url: String,
    headers: RwLock<HeaderMap>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: RwLock::new(headers),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========== Headers ==========

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn set_auth_token(&self, token: &str) -> Result<(), String> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| format!("Invalid auth token: {}", e))?;
        self.headers.write().insert(AUTHORIZATION, value);
        Ok(())
    }

    pub fn clear_auth_token(&self) {
        self.headers.write().remove(AUTHORIZATION);
    }

    pub fn set_header(&self, key: &str, value: &str) -> Result<(), String> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| format!("Invalid header name '{}': {}", key, e))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| format!("Invalid value for header '{}': {}", key, e))?;
        self.headers.write().insert(name, value);
        Ok(())
    }

    pub fn remove_header(&self, key: &str) {
        self.headers.write().remove(key);
    }

    /// Current value of a default header.
    pub fn header(&self, key: &str) -> Option<String> {
        self.headers
            .read()
            .get(key)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    // ========== Verbs ==========

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.send(Method::GET, endpoint, self.builder(Method::GET, endpoint))
            .await
    }

    /// GET with query parameters; `None` fields of `query` are left out when
    /// it skips them during serialization.
    pub async fn get_with_query<T, Q>(&self, endpoint: &str, query: &Q) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, endpoint).query(query);
        self.send(Method::GET, endpoint, builder).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(Method::POST, endpoint).json(body);
        self.send(Method::POST, endpoint, builder).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.send(Method::POST, endpoint, self.builder(Method::POST, endpoint))
            .await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(Method::PUT, endpoint).json(body);
        self.send(Method::PUT, endpoint, builder).await
    }

    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(Method::PATCH, endpoint).json(body);
        self.send(Method::PATCH, endpoint, builder).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
        self.send(Method::DELETE, endpoint, self.builder(Method::DELETE, endpoint))
            .await
    }

    /// GET retried with exponential backoff until it succeeds or
    /// `max_attempts` calls have failed.
    pub async fn get_with_retry<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        max_attempts: u32,
        base_delay: Duration,
    ) -> Result<T, String> {
        lib_utils::retry(max_attempts, base_delay, || async {
            self.get::<T>(endpoint).await.into_result()
        })
        .await
    }

    // ========== Plumbing ==========

    fn builder(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = self.headers.read().clone();
        self.client.request(method, url).headers(headers)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> ApiResponse<T> {
        match Self::execute(builder).await {
            Ok(data) => {
                debug!(%method, endpoint, "API request succeeded");
                ApiResponse::ok(data)
            }
            Err(e) => {
                warn!(%method, endpoint, "API Error: {}", e);
                ApiResponse::failure(e)
            }
        }
    }

    async fn execute<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, String> {
        let response = builder
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown Status")
                    )
                });
            return Err(message);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}
