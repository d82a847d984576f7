//! HTTP client for PIM API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the PIM API with optional retry handling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUri, PimConfig};

/// Fixed retry wait time in seconds, used when no `Retry-After` is given.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the PIM API.
///
/// The client handles:
/// - URL construction from the configured base URI
/// - Default headers including User-Agent and the bearer token
/// - Automatic retry logic for 429 and 5xx responses when `tries > 1`
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone: clones share the
/// underlying connection pool. Owned futures (see
/// [`ResourceClient::upsert_async_resource`](crate::clients::ResourceClient::upsert_async_resource))
/// rely on this.
///
/// # Example
///
/// ```rust,ignore
/// use pim_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes/color")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: BaseUri,
    default_headers: Arc<HashMap<String, String>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &PimConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}PIM API Rust Client v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: config.base_uri().clone(),
            default_headers: Arc::new(default_headers),
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub const fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves the full URL of a request.
    ///
    /// Relative paths are appended to the base URI. Absolute URLs, such as
    /// pagination links, must live under the base URI.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::ForeignUrl`] for absolute URLs
    /// outside of the base URI.
    pub fn url_for(&self, request: &HttpRequest) -> Result<String, InvalidHttpRequestError> {
        if request.is_absolute() {
            if !self.base_uri.owns(&request.path) {
                return Err(InvalidHttpRequestError::ForeignUrl {
                    url: request.path.clone(),
                    base_uri: self.base_uri.to_string(),
                });
            }
            return Ok(request.path.clone());
        }

        Ok(format!(
            "{}/{}",
            self.base_uri,
            request.path.trim_start_matches('/')
        ))
    }

    /// Sends an HTTP request to the PIM API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let url = self.url_for(&request)?;

        let mut headers: HashMap<String, String> = self.default_headers.as_ref().clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.clone());
            }

            tracing::debug!(method = %request.http_method, path = %request.path, "Sending request");

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let text = res.text().await?;

            let response = HttpResponse::new(code, res_headers, text);

            if response.is_ok() {
                return Ok(response);
            }

            let message = response.error_message();

            let should_retry = code == 429 || code >= 500;
            if !should_retry || tries >= request.tries {
                if should_retry && request.tries > 1 {
                    return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                        code,
                        tries: request.tries,
                        message,
                    }));
                }
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    retry_after: response.retry_request_after,
                    body: response.body,
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                status = code,
                attempt = tries,
                delay_ms = delay.as_millis(),
                path = %request.path,
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap` with lowercase names.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        // Retry-After is only honoured on 429
        if status == 429 {
            if let Some(retry_after) = response
                .retry_request_after
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
            {
                return Duration::from_secs_f64(retry_after);
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessToken;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_uri: &str) -> PimConfig {
        PimConfig::builder()
            .base_uri(BaseUri::new(base_uri).unwrap())
            .access_token(AccessToken::new("test-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorization_header_uses_bearer_token() {
        let client = HttpClient::new(&create_config("https://pim.example.com")).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-token".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_config("https://pim.example.com")).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("PIM API Rust Client v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = PimConfig::builder()
            .base_uri(BaseUri::new("https://pim.example.com").unwrap())
            .access_token(AccessToken::new("test-token").unwrap())
            .user_agent_prefix("MyConnector/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyConnector/1.0 | "));
    }

    #[test]
    fn test_url_for_relative_and_absolute_paths() {
        let client = HttpClient::new(&create_config("https://pim.example.com")).unwrap();

        let relative = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes")
            .build()
            .unwrap();
        assert_eq!(
            client.url_for(&relative).unwrap(),
            "https://pim.example.com/api/rest/v1/attributes"
        );

        let link = HttpRequest::builder(
            HttpMethod::Get,
            "https://pim.example.com/api/rest/v1/attributes?page=2",
        )
        .build()
        .unwrap();
        assert_eq!(
            client.url_for(&link).unwrap(),
            "https://pim.example.com/api/rest/v1/attributes?page=2"
        );

        let foreign = HttpRequest::builder(HttpMethod::Get, "https://elsewhere.test/steal")
            .build()
            .unwrap();
        assert!(matches!(
            client.url_for(&foreign),
            Err(InvalidHttpRequestError::ForeignUrl { .. })
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[tokio::test]
    async fn test_request_sends_headers_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/rest/v1/attributes"))
            .and(query_param("limit", "10"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&create_config(&mock_server.uri())).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes")
            .query_param("limit", "10")
            .build()
            .unwrap();

        let response = client.request(request).await.unwrap();
        assert_eq!(response.body["ok"], true);
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_response_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/rest/v1/attributes/unknown"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "code": 404,
                "message": "Resource `unknown` does not exist."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&create_config(&mock_server.uri())).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes/unknown")
            .tries(3)
            .build()
            .unwrap();

        match client.request(request).await {
            Err(HttpError::Response(error)) => {
                assert_eq!(error.code, 404);
                assert_eq!(error.message, "Resource `unknown` does not exist.");
            }
            other => panic!("Expected response error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_retries_are_exhausted_on_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/rest/v1/attributes"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", "0")
                    .set_body_json(serde_json::json!({"code": 429, "message": "Too many requests"})),
            )
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(&create_config(&mock_server.uri())).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "api/rest/v1/attributes")
            .tries(2)
            .build()
            .unwrap();

        match client.request(request).await {
            Err(HttpError::MaxRetries(error)) => {
                assert_eq!(error.code, 429);
                assert_eq!(error.tries, 2);
            }
            other => panic!("Expected max retries error, got {other:?}"),
        }
    }
}
