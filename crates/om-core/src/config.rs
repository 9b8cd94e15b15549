//! Configuration management for the OneMap client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct for the OneMap client
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
  /// Account email. Authentication only happens when both email and password are set.
  pub email: Option<String>,

  /// Account password
  pub password: Option<String>,

  /// Base URL for the OneMap API, always ending in `/`
  pub base_url: String,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Refresh the token when it has fewer than this many seconds left
  pub refresh_margin_secs: i64,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let email = read_var("ONEMAP_EMAIL")?;
    let password = read_var("ONEMAP_PASSWORD")?;

    let base_url = read_var("ONEMAP_BASE_URL")?.unwrap_or_else(|| crate::ONEMAP_BASE_URL.to_string());

    let timeout_secs = match read_var("ONEMAP_TIMEOUT_SECS")? {
      Some(raw) => raw.parse().map_err(|_| Error::Config("Invalid ONEMAP_TIMEOUT_SECS".to_string()))?,
      None => crate::DEFAULT_TIMEOUT_SECS,
    };

    let refresh_margin_secs = match read_var("ONEMAP_REFRESH_MARGIN_SECS")? {
      Some(raw) => {
        raw.parse().map_err(|_| Error::Config("Invalid ONEMAP_REFRESH_MARGIN_SECS".to_string()))?
      }
      None => crate::DEFAULT_REFRESH_MARGIN_SECS,
    };

    Ok(Config {
      email,
      password,
      base_url: normalize_base_url(&base_url)?,
      timeout_secs,
      refresh_margin_secs,
    })
  }

  /// Default configuration carrying credentials
  pub fn with_credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
    Config { email: Some(email.into()), password: Some(password.into()), ..Config::default() }
  }

  /// Point the client at a different server (a proxy or a test double)
  pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
    self.base_url = normalize_base_url(base_url)?;
    Ok(self)
  }

  pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
    self.timeout_secs = timeout_secs;
    self
  }

  pub fn has_credentials(&self) -> bool {
    self.email.is_some() && self.password.is_some()
  }
}

impl Default for Config {
  fn default() -> Self {
    Config {
      email: None,
      password: None,
      base_url: crate::ONEMAP_BASE_URL.to_string(),
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      refresh_margin_secs: crate::DEFAULT_REFRESH_MARGIN_SECS,
    }
  }
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("email", &self.email)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("base_url", &self.base_url)
      .field("timeout_secs", &self.timeout_secs)
      .field("refresh_margin_secs", &self.refresh_margin_secs)
      .finish()
  }
}

/// Unset and empty variables are `None`; a value that is not UTF-8 is an error
fn read_var(key: &str) -> Result<Option<String>> {
  match env::var(key) {
    Ok(value) => Ok(Some(value).filter(|v| !v.is_empty())),
    Err(env::VarError::NotPresent) => Ok(None),
    Err(e) => Err(e.into()),
  }
}

fn normalize_base_url(raw: &str) -> Result<String> {
  let url = Url::parse(raw).map_err(|e| Error::Config(format!("Invalid base URL {raw}: {e}")))?;
  let mut normalized = url.to_string();
  if !normalized.ends_with('/') {
    normalized.push('/');
  }
  Ok(normalized)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn clear_env() {
    for key in [
      "ONEMAP_EMAIL",
      "ONEMAP_PASSWORD",
      "ONEMAP_BASE_URL",
      "ONEMAP_TIMEOUT_SECS",
      "ONEMAP_REFRESH_MARGIN_SECS",
    ] {
      env::remove_var(key);
    }
  }

  #[test]
  #[serial]
  fn test_config_from_env() {
    clear_env();
    env::set_var("ONEMAP_EMAIL", "email@example.com");
    env::set_var("ONEMAP_PASSWORD", "password");
    let config = Config::from_env().unwrap();
    assert!(config.has_credentials());
    assert_eq!(config.email.as_deref(), Some("email@example.com"));
    assert_eq!(config.base_url, crate::ONEMAP_BASE_URL);
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.refresh_margin_secs, 120);
    clear_env();
  }

  #[test]
  #[serial]
  fn test_config_invalid_timeout() {
    clear_env();
    env::set_var("ONEMAP_TIMEOUT_SECS", "soon");
    assert!(matches!(Config::from_env(), Err(Error::Config(_))));
    clear_env();
  }

  #[test]
  #[serial]
  #[cfg(unix)]
  fn test_config_non_unicode_variable() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    clear_env();
    env::set_var("ONEMAP_EMAIL", OsStr::from_bytes(&[0x6d, 0x65, 0x80]));
    assert!(matches!(Config::from_env(), Err(Error::EnvVar(_))));
    clear_env();
  }

  #[test]
  #[serial]
  fn test_config_empty_values_use_defaults() {
    clear_env();
    env::set_var("ONEMAP_PASSWORD", "");
    env::set_var("ONEMAP_TIMEOUT_SECS", "");
    let config = Config::from_env().unwrap();
    assert_eq!(config.password, None);
    assert_eq!(config.timeout_secs, crate::DEFAULT_TIMEOUT_SECS);
    clear_env();
  }

  #[test]
  fn test_base_url_gets_trailing_slash() {
    let config = Config::default().with_base_url("http://127.0.0.1:9000").unwrap();
    assert_eq!(config.base_url, "http://127.0.0.1:9000/");
    assert!(Config::default().with_base_url("not a url").is_err());
  }

  #[test]
  fn test_debug_redacts_password() {
    let config = Config::with_credentials("email@example.com", "hunter2");
    let printed = format!("{:?}", config);
    assert!(!printed.contains("hunter2"));
    assert!(printed.contains("email@example.com"));
  }
}
