//! HTTP transport layer for OneMap API requests

use async_trait::async_trait;
use om_core::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Status code and JSON body of one HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status_code: u16,
  /// Parsed body, `Value::Null` when the body was empty or not JSON
  pub data: Value,
}

impl ApiResponse {
  pub fn new(status_code: u16, data: Value) -> Self {
    Self { status_code, data }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
  Get,
  Post,
}

impl HttpMethod {
  /// Methods that must carry a body
  pub fn requires_body(&self) -> bool {
    matches!(self, HttpMethod::Post)
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HttpMethod::Get => write!(f, "GET"),
      HttpMethod::Post => write!(f, "POST"),
    }
  }
}

/// One request handed to an [`HttpTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
  pub url: String,
  pub method: HttpMethod,
  pub body: Option<Value>,
  pub timeout: Duration,
}

impl HttpRequest {
  pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
    Self { url: url.into(), method: HttpMethod::Get, body: None, timeout }
  }

  pub fn post(url: impl Into<String>, body: Value, timeout: Duration) -> Self {
    Self { url: url.into(), method: HttpMethod::Post, body: Some(body), timeout }
  }

  /// Rejects a POST without a body before anything is sent
  pub fn validate(&self) -> Result<()> {
    if self.method.requires_body() && self.body.is_none() {
      return Err(Error::InvalidInput(
        "Data must be provided for POST, PUT and PATCH requests.".to_string(),
      ));
    }
    Ok(())
  }
}

/// Sends one HTTP request and returns the status and JSON body.
///
/// Implementations must not retry and must not interpret the status code.
#[async_trait]
pub trait HttpTransport: Send + Sync {
  async fn send(&self, request: HttpRequest) -> Result<ApiResponse>;
}

/// [`HttpTransport`] backed by `reqwest`
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  /// Create a new transport instance
  pub fn new() -> Result<Self> {
    let client = Client::builder()
      .user_agent(concat!("om-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client })
  }

  /// Wrap an existing `reqwest::Client`, e.g. one with a proxy configured
  pub fn with_client(client: Client) -> Self {
    Self { client }
  }
}

impl fmt::Debug for ReqwestTransport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ReqwestTransport").finish_non_exhaustive()
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  #[instrument(skip(self, request), fields(method = %request.method, url = %redact_token(&request.url)))]
  async fn send(&self, request: HttpRequest) -> Result<ApiResponse> {
    request.validate()?;

    let builder = match request.method {
      HttpMethod::Get => self.client.get(&request.url),
      HttpMethod::Post => self.client.post(&request.url).json(&request.body),
    };

    let response = builder.timeout(request.timeout).send().await.map_err(|e| {
      error!("Request failed: {}", e);
      Error::Http(format!("Request failed: {}", e))
    })?;

    let status_code = response.status().as_u16();
    let text = response
      .text()
      .await
      .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

    debug!("Response status {} with {} byte body", status_code, text.len());
    #[cfg(feature = "debug-logging")]
    debug!("Response body: {}", text);

    let data = if text.trim().is_empty() {
      Value::Null
    } else {
      serde_json::from_str(&text).unwrap_or_else(|e| {
        debug!("Response body is not JSON: {}", e);
        Value::Null
      })
    };

    Ok(ApiResponse { status_code, data })
  }
}

/// Masks the `token` query parameter so it never reaches the logs
pub(crate) fn redact_token(url: &str) -> String {
  match url.find("token=") {
    Some(start) => {
      let value_start = start + "token=".len();
      let value_end = url[value_start..].find('&').map_or(url.len(), |i| value_start + i);
      format!("{}***{}", &url[..value_start], &url[value_end..])
    }
    None => url.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_post_without_body_is_rejected() {
    let mut request = HttpRequest::post("https://example.com/api", json!({}), Duration::from_secs(1));
    assert!(request.validate().is_ok());

    request.body = None;
    let err = request.validate().unwrap_err();
    assert!(err.is_precondition());
  }

  #[test]
  fn test_get_needs_no_body() {
    let request = HttpRequest::get("https://example.com/api", Duration::from_secs(1));
    assert!(request.validate().is_ok());
    assert_eq!(request.method.to_string(), "GET");
  }

  #[test]
  fn test_redact_token() {
    assert_eq!(
      redact_token("https://x/route?start=1,2&token=abc.def&buffer=10"),
      "https://x/route?start=1,2&token=***&buffer=10"
    );
    assert_eq!(redact_token("https://x/route?token=abc"), "https://x/route?token=***");
    assert_eq!(redact_token("https://x/search?searchVal=a"), "https://x/search?searchVal=a");
  }

  #[tokio::test]
  async fn test_post_without_body_sends_nothing() {
    let transport = ReqwestTransport::new().unwrap();
    let request = HttpRequest {
      url: "http://127.0.0.1:9/never".to_string(),
      method: HttpMethod::Post,
      body: None,
      timeout: Duration::from_secs(1),
    };
    let err = transport.send(request).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
  }
}
