use thiserror::Error;

/// Fallback message for a 4xx response without an `error` field
pub const BAD_REQUEST_MESSAGE: &str = "Please ensure request is correct.";

/// Message used for every 5xx response
pub const SERVER_ERROR_MESSAGE: &str = "OneMap SG server error. Please try again later.";

/// The main error type for om-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Missing or rejected credentials, or a protected call made without a token
  #[error("Authentication error: {0}")]
  Authentication(String),

  /// 4xx response to an operational call
  #[error("{0}")]
  BadRequest(String),

  /// 5xx response from OneMap
  #[error("{0}")]
  Server(String),

  /// Invalid caller input, raised before any network activity
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// A successful response whose body could not be mapped
  #[error("Invalid API response: {0}")]
  InvalidResponse(String),

  /// Missing required field in response
  #[error("Missing required field: {0}")]
  MissingField(String),

  /// Malformed encoded route geometry
  #[error("Polyline error: {0}")]
  Polyline(String),

  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Serialization/Deserialization error
  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),
}

impl Error {
  /// True for input validation failures. These are programmer errors and
  /// retrying the call cannot succeed.
  pub fn is_precondition(&self) -> bool {
    matches!(self, Error::InvalidInput(_))
  }

  /// Builds the `BadRequest` for a 4xx body, preferring the upstream `error` text.
  pub fn bad_request_from_body(data: &serde_json::Value) -> Self {
    match data.get("error") {
      Some(serde_json::Value::String(msg)) => Error::BadRequest(msg.clone()),
      Some(other) if !other.is_null() => Error::BadRequest(other.to_string()),
      _ => Error::BadRequest(BAD_REQUEST_MESSAGE.to_string()),
    }
  }

  pub fn server() -> Self {
    Error::Server(SERVER_ERROR_MESSAGE.to_string())
  }
}

/// Result type alias for om-* crates
pub type Result<T> = std::result::Result<T, Error>;
