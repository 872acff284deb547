//! HTTP transport for API calls.
//!
//! [`Transport`] is the seam between the API client and the network. The
//! default implementation, [`HttpClient`], wraps one pooled `reqwest` client
//! that is shared by every request the API client makes.

use crate::error::{AnypayError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use std::collections::HashMap;
use std::time::Duration;

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Convert the response body to a UTF-8 string.
    ///
    /// # Errors
    /// Returns a protocol error if the body is not valid UTF-8.
    pub fn body_string(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|_| AnypayError::protocol("response body is not valid UTF-8"))
    }

    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Get a header value by name (case-insensitive).
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }
}

/// Issues GET requests on behalf of the API client.
///
/// Implementations must be shareable across tasks; the client calls
/// `get` concurrently from every in-flight operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request with the given query parameters.
    ///
    /// Failures to obtain any response must be reported as
    /// [`AnypayError::Transport`].
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse>;
}

/// Builder for configuring HTTP clients.
///
/// This provides a fluent API for setting up an [`HttpClient`].
#[must_use]
pub struct HttpClientBuilder {
    verbose: bool,
    timeout: Option<u64>,
    connect_timeout: Option<u64>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
}

impl HttpClientBuilder {
    /// Create a new HTTP client builder with default settings.
    pub fn new() -> Self {
        Self {
            verbose: false,
            timeout: None,
            connect_timeout: None,
            user_agent: None,
            headers: Vec::new(),
        }
    }

    /// Log connection-level reads and writes at trace level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the overall request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the connection timeout in seconds.
    pub fn connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = Some(seconds);
        self
    }

    /// Set custom User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Add a custom HTTP header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add multiple headers at once.
    pub fn headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend_from_slice(headers);
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AnypayError::InvalidConfig(format!("Invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AnypayError::InvalidConfig(format!("Invalid value for header '{name}': {e}")))?;
            default_headers.insert(name, value);
        }

        // The API answers every endpoint directly; a redirect means a wrong base URL.
        let mut builder = reqwest::Client::builder()
            .default_headers(default_headers)
            .redirect(reqwest::redirect::Policy::none())
            .connection_verbose(self.verbose);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(timeout));
        }

        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }

        let client = builder
            .build()
            .map_err(|e| AnypayError::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpClient { client })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pooled `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AnypayError::transport(error_chain(&e)))?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        // A connection dropped mid-body is still a transport failure.
        let body = response
            .bytes()
            .await
            .map_err(|e| AnypayError::transport(error_chain(&e)))?
            .to_vec();

        Ok(HttpResponse {
            status_code,
            headers,
            body,
        })
    }
}

/// Render an error with all of its sources, e.g.
/// "error sending request: tcp connect error: Connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &[u8]) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_is_success() {
        assert!(response(200, b"{}").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(301, b"").is_success());
        assert!(!response(500, b"").is_success());
    }

    #[test]
    fn test_get_header_case_insensitive() {
        let resp = response(200, b"{}");
        assert_eq!(
            resp.get_header("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert!(resp.get_header("X-Missing").is_none());
    }

    #[test]
    fn test_body_string_rejects_invalid_utf8() {
        assert_eq!(response(200, b"ok").body_string().unwrap(), "ok");
        assert!(matches!(
            response(200, &[0xff, 0xfe]).body_string(),
            Err(AnypayError::Protocol(_))
        ));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("error sending request")
            }
        }

        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(error_chain(&err), "error sending request: Connection refused");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let result = HttpClientBuilder::new().header("Bad Header", "x").build();
        assert!(matches!(result, Err(AnypayError::InvalidConfig(_))));
    }
}
