//! HTTP response types for the PIM API client.
//!
//! This module provides the [`HttpResponse`] type for accessing API
//! response data.

use std::collections::HashMap;

/// An HTTP response from the PIM API.
///
/// Contains the status code, headers, the raw body text and its JSON
/// decoding. Bulk endpoints answer with newline-delimited JSON, which is
/// why the raw text is kept alongside the decoded body.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers with lowercase names (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body, `{}` when empty or not a JSON document
    /// (see [`decode_error`](Self::decode_error)).
    pub body: serde_json::Value,
    /// The raw response body.
    pub text: String,
    /// Why a non-empty body could not be decoded as a single JSON document.
    pub decode_error: Option<String>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, decoding the body and `Retry-After` header.
    ///
    /// Non-JSON bodies of 5xx responses are kept under a `raw_body` key so
    /// that server errors remain visible in error messages.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, text: String) -> Self {
        let (body, decode_error) = if text.trim().is_empty() {
            (serde_json::json!({}), None)
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => (body, None),
                Err(e) if code >= 500 => {
                    (serde_json::json!({ "raw_body": text }), Some(e.to_string()))
                }
                Err(e) => (serde_json::json!({}), Some(e.to_string())),
            }
        };

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            text,
            decode_error,
            retry_request_after,
        }
    }

    /// Returns the decoded JSON document.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the body is empty or not a
    /// JSON document.
    pub fn json(&self) -> Result<&serde_json::Value, String> {
        if let Some(error) = &self.decode_error {
            return Err(format!("response body is not JSON: {error}"));
        }
        if self.text.trim().is_empty() {
            return Err("response body is empty".to_string());
        }
        Ok(&self.body)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Location` header, set by the API on resource creation.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    /// Returns the error message reported by the API.
    ///
    /// Uses the `message` field of the body when present, and the raw
    /// body otherwise.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| self.text.trim().to_string(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 401, 404, 422, 429, 500] {
            let response = HttpResponse::new(code, HashMap::new(), String::new());
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_empty_body_returns_empty_json() {
        let response = HttpResponse::new(204, HashMap::new(), String::new());
        assert_eq!(response.body, serde_json::json!({}));
    }

    #[test]
    fn test_ndjson_body_keeps_raw_text() {
        let text = "{\"line\":1}\n{\"line\":2}".to_string();
        let response = HttpResponse::new(200, HashMap::new(), text.clone());
        assert_eq!(response.body, serde_json::json!({}));
        assert_eq!(response.text, text);
        assert!(response.decode_error.is_some());
    }

    #[test]
    fn test_json_rejects_empty_and_malformed_bodies() {
        let response = HttpResponse::new(200, HashMap::new(), String::new());
        assert_eq!(response.json().unwrap_err(), "response body is empty");

        let response = HttpResponse::new(200, HashMap::new(), "<html>proxy</html>".to_string());
        assert!(response
            .json()
            .unwrap_err()
            .starts_with("response body is not JSON"));

        let response = HttpResponse::new(200, HashMap::new(), r#"{"code":"color"}"#.to_string());
        assert_eq!(response.json().unwrap()["code"], "color");
        assert!(response.decode_error.is_none());
    }

    #[test]
    fn test_non_json_server_error_is_kept_as_raw_body() {
        let response = HttpResponse::new(502, HashMap::new(), "Bad Gateway".to_string());
        assert_eq!(response.body["raw_body"], "Bad Gateway");
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2.5".to_string()]);

        let response = HttpResponse::new(429, headers, String::new());
        assert!((response.retry_request_after.unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_location_header_lookup() {
        let mut headers = HashMap::new();
        headers.insert(
            "location".to_string(),
            vec!["https://pim.example.com/api/rest/v1/attributes/color".to_string()],
        );

        let response = HttpResponse::new(201, headers, String::new());
        assert_eq!(
            response.location(),
            Some("https://pim.example.com/api/rest/v1/attributes/color")
        );
        assert_eq!(response.header("Location"), response.location());
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let response = HttpResponse::new(
            404,
            HashMap::new(),
            r#"{"code":404,"message":"Resource `foo` does not exist."}"#.to_string(),
        );
        assert_eq!(response.error_message(), "Resource `foo` does not exist.");

        let response = HttpResponse::new(500, HashMap::new(), "oops".to_string());
        assert_eq!(response.error_message(), "oops");
    }
}
