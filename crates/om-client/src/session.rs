/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Credential and bearer-token state for one client

use crate::transport::ApiResponse;
use om_core::{Error, Result, StatusClass};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Message for protected calls made before any successful authentication
pub const AUTH_REQUIRED_MESSAGE: &str =
  "This call requires authentication, please call authenticate() with a valid username and password.";

/// Bearer token and its absolute expiry (unix seconds). Both are set or
/// cleared together.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenState {
  token: Option<String>,
  token_expiry: Option<i64>,
}

impl TokenState {
  pub fn new(token: impl Into<String>, token_expiry: i64) -> Self {
    Self { token: Some(token.into()), token_expiry: Some(token_expiry) }
  }

  pub fn set(&mut self, token: impl Into<String>, token_expiry: i64) {
    self.token = Some(token.into());
    self.token_expiry = Some(token_expiry);
  }

  pub fn clear(&mut self) {
    self.token = None;
    self.token_expiry = None;
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  pub fn token_expiry(&self) -> Option<i64> {
    self.token_expiry
  }

  pub fn is_present(&self) -> bool {
    self.token.is_some()
  }

  pub fn seconds_remaining(&self, now: i64) -> Option<i64> {
    self.token_expiry.map(|expiry| expiry - now)
  }

  /// True when the token expires within `margin_secs` of `now`
  pub fn needs_refresh(&self, now: i64, margin_secs: i64) -> bool {
    self.seconds_remaining(now).is_some_and(|left| left < margin_secs)
  }
}

impl fmt::Debug for TokenState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenState")
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .field("token_expiry", &self.token_expiry)
      .finish()
  }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

impl Credentials {
  pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
    Self { email: email.into(), password: password.into() }
  }

  /// JSON body for the token endpoint
  pub fn to_body(&self) -> Value {
    serde_json::json!({ "email": self.email, "password": self.password })
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials").field("email", &self.email).field("password", &"<redacted>").finish()
  }
}

/// What a protected call has to do about the token before it is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshDecision {
  /// Token is valid beyond the margin
  Fresh,
  /// Token is about to expire; authenticate again with these credentials
  Refresh(Credentials),
  /// Token is about to expire but was supplied without credentials
  Borrowed,
}

/// Everything the client knows about who it is
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub credentials: Option<Credentials>,
  pub tokens: TokenState,
}

impl Session {
  pub fn new(credentials: Option<Credentials>) -> Self {
    Self { credentials, tokens: TokenState::default() }
  }

  /// Refresh-ahead policy for a protected call. Fails when there is no token.
  pub fn refresh_decision(&self, now: i64, margin_secs: i64) -> Result<RefreshDecision> {
    if !self.tokens.is_present() {
      return Err(Error::Authentication(AUTH_REQUIRED_MESSAGE.to_string()));
    }
    if !self.tokens.needs_refresh(now, margin_secs) {
      return Ok(RefreshDecision::Fresh);
    }
    Ok(match &self.credentials {
      Some(credentials) => RefreshDecision::Refresh(credentials.clone()),
      None => RefreshDecision::Borrowed,
    })
  }

  /// Stores a completed exchange. `None` (an unmodelled status) keeps the old token.
  pub fn apply(&mut self, outcome: Option<(String, i64)>) -> (Option<String>, Option<i64>) {
    match outcome {
      Some((token, expiry)) => {
        self.tokens.set(token.clone(), expiry);
        (Some(token), Some(expiry))
      }
      None => (None, None),
    }
  }
}

/// Body of a successful `getToken` call. The expiry arrives as either a
/// number or a numeric string.
#[derive(Deserialize)]
struct TokenResponse {
  access_token: Option<String>,
  expiry_timestamp: Option<Value>,
}

/// Interprets the token endpoint's response.
///
/// 200 yields the token and expiry, 4xx is an authentication failure, 5xx a
/// server error, and anything else `Ok(None)`.
pub fn parse_token_response(response: &ApiResponse) -> Result<Option<(String, i64)>> {
  match StatusClass::from_code(response.status_code) {
    StatusClass::Ok => {
      let body: TokenResponse = serde_json::from_value(response.data.clone())?;
      let token = body.access_token.ok_or_else(|| Error::MissingField("access_token".to_string()))?;
      let expiry = match body.expiry_timestamp {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
      }
      .ok_or_else(|| Error::MissingField("expiry_timestamp".to_string()))?;
      Ok(Some((token, expiry)))
    }
    StatusClass::ClientError => Err(Error::Authentication("Failed to authenticate.".to_string())),
    StatusClass::ServerError => Err(Error::server()),
    StatusClass::Other => Ok(None),
  }
}
