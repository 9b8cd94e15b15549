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

use crate::operation::{
  ApiResult, Operation, ReverseGeocodeParams, ReverseType, RouteParams, SearchParams,
};
use crate::query::{
  validate_address_type, Location, RouteType, TransitOptions, DEFAULT_ADDRESS_TYPE, DEFAULT_BUFFER,
};
use crate::session::{parse_token_response, Credentials, RefreshDecision, Session};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use om_core::{Config, Endpoint, Error, Result, StatusClass};
use om_models::{GeocodeInfo, RouteResult, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Main OneMap API client
///
/// Owns the credentials and bearer token. Protected calls check the token
/// first and transparently re-authenticate when it expires within the
/// configured margin (two minutes by default). Nothing is retried: every
/// failure is returned to the caller as it happens.
///
/// # Examples
///
/// ```ignore
/// use om_client::{OneMapClient, RouteType};
/// use om_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OneMapClient::new(Config::with_credentials("me@example.com", "secret")).await?;
///
///     if let Some(found) = client.search_with_defaults("307987").await? {
///         println!("{} matches", found.results.len());
///     }
///
///     let route = client.route("1.3197,103.8421", "1.2996,103.8001", RouteType::Drive, None).await?;
///     println!("{:?}", route.map(|r| r.to_dict()));
///     Ok(())
/// }
/// ```
pub struct OneMapClient {
  config: Config,
  transport: Arc<dyn HttpTransport>,
  session: Mutex<Session>,
}

impl OneMapClient {
  /// Create a client on the default `reqwest` transport.
  ///
  /// Authenticates immediately when `config` carries both email and
  /// password; an authentication failure is returned, not swallowed.
  pub async fn new(config: Config) -> Result<Self> {
    let transport = Arc::new(ReqwestTransport::new()?);
    Self::with_transport(config, transport).await
  }

  /// Same as [`OneMapClient::new`] with a caller supplied transport
  pub async fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Result<Self> {
    let client = Self::unauthenticated(config, transport);
    let credentials = client.session.lock().await.credentials.clone();
    if let Some(credentials) = credentials {
      client.authenticate(&credentials.email, &credentials.password).await?;
    }
    Ok(client)
  }

  /// Load configuration from the environment and build a client
  pub async fn from_env() -> Result<Self> {
    Self::new(Config::from_env()?).await
  }

  /// Anonymous client: public endpoints only until [`authenticate`](Self::authenticate) succeeds
  pub fn anonymous() -> Result<Self> {
    Ok(Self::unauthenticated(Config::default(), Arc::new(ReqwestTransport::new()?)))
  }

  /// Build without contacting the server, even if credentials are configured
  pub fn unauthenticated(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
    let credentials = match (&config.email, &config.password) {
      (Some(email), Some(password)) => Some(Credentials::new(email.as_str(), password.as_str())),
      _ => None,
    };
    Self { config, transport, session: Mutex::new(Session::new(credentials)) }
  }

  /// Use a token obtained elsewhere. Without stored credentials it is never refreshed.
  pub fn with_token(mut self, token: impl Into<String>, token_expiry: i64) -> Self {
    self.session.get_mut().tokens.set(token, token_expiry);
    self
  }

  /// Store credentials and fetch a new token, replacing any previous one.
  ///
  /// Returns `(None, None)` and leaves the current token in place when the
  /// server answers with a status other than 200, 4xx or 5xx.
  #[instrument(skip(self, password))]
  pub async fn authenticate(&self, email: &str, password: &str) -> Result<(Option<String>, Option<i64>)> {
    let credentials = Credentials::new(email, password);
    let mut session = self.session.lock().await;
    session.credentials = Some(credentials.clone());
    let outcome = self.request_token(&credentials).await?;
    Ok(session.apply(outcome))
  }

  pub async fn token(&self) -> Option<String> {
    self.session.lock().await.tokens.token().map(str::to_string)
  }

  pub async fn token_expiry(&self) -> Option<i64> {
    self.session.lock().await.tokens.token_expiry()
  }

  pub async fn email(&self) -> Option<String> {
    self.session.lock().await.credentials.as_ref().map(|c| c.email.clone())
  }

  pub async fn is_authenticated(&self) -> bool {
    self.session.lock().await.tokens.is_present()
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Run one operation end to end.
  ///
  /// `Ok(None)` means the server answered with a status the client does not
  /// model (anything but 200, 4xx and 5xx).
  #[instrument(skip(self, operation), fields(operation = %operation.name()))]
  pub async fn execute(&self, operation: Operation) -> Result<Option<ApiResult>> {
    let token = self.ensure_fresh_token(operation.endpoint()).await?;
    let url = operation.build_url(&self.config.base_url, token.as_deref().unwrap_or_default())?;

    let response = self.transport.send(HttpRequest::get(url, self.timeout())).await?;
    match StatusClass::from_code(response.status_code) {
      StatusClass::Ok => operation.parse(&response.data).map(Some),
      StatusClass::ClientError => Err(Error::bad_request_from_body(&response.data)),
      StatusClass::ServerError => Err(Error::server()),
      StatusClass::Other => {
        warn!("Unhandled status {} for {}, returning no result", response.status_code, operation.name());
        Ok(None)
      }
    }
  }

  /// Search addresses, buildings and postal codes. Does not need a token.
  pub async fn search(
    &self,
    search_val: &str,
    return_geometry: bool,
    get_address_details: bool,
    page_number: Option<u32>,
  ) -> Result<Option<SearchResult>> {
    let operation = Operation::Search(SearchParams {
      search_val: search_val.to_string(),
      return_geometry,
      get_address_details,
      page_number,
    });
    Ok(self.execute(operation).await?.and_then(ApiResult::into_search))
  }

  /// [`search`](Self::search) with geometry and address details, first page
  pub async fn search_with_defaults(&self, search_val: &str) -> Result<Option<SearchResult>> {
    self.search(search_val, true, true, None).await
  }

  /// Route between two `"lat,long"` points.
  ///
  /// `transit_options` only apply to [`RouteType::Pt`].
  pub async fn route(
    &self,
    start: &str,
    end: &str,
    route_type: RouteType,
    transit_options: Option<TransitOptions>,
  ) -> Result<Option<RouteResult>> {
    let operation = Operation::Route(RouteParams {
      start: start.to_string(),
      end: end.to_string(),
      route_type,
      transit_options,
    });
    Ok(self.execute(operation).await?.and_then(ApiResult::into_route))
  }

  /// Buildings within `buffer` metres of `location`.
  ///
  /// `reverse_type` must be exactly `svy21` or `wgs84` and `address_type`
  /// `all` or `hdb`; both are checked before any request is made.
  pub async fn reverse_geocode(
    &self,
    reverse_type: &str,
    location: impl Into<Location>,
    buffer: u32,
    address_type: &str,
    other_features: bool,
  ) -> Result<Option<GeocodeInfo>> {
    let reverse_type: ReverseType = reverse_type.parse()?;
    let operation = Operation::ReverseGeocode(
      reverse_type,
      ReverseGeocodeParams {
        location: location.into(),
        buffer,
        address_type: validate_address_type(address_type)?,
        other_features,
      },
    );
    Ok(self.execute(operation).await?.and_then(ApiResult::into_geocode))
  }

  /// [`reverse_geocode`](Self::reverse_geocode) with a 10 m buffer, all address types, no other features
  pub async fn reverse_geocode_with_defaults(
    &self,
    reverse_type: &str,
    location: impl Into<Location>,
  ) -> Result<Option<GeocodeInfo>> {
    self.reverse_geocode(reverse_type, location, DEFAULT_BUFFER, DEFAULT_ADDRESS_TYPE, false).await
  }

  /// Token to send for `endpoint`, re-authenticating first when a protected
  /// call would go out on a token inside the refresh margin.
  ///
  /// The session lock is held across the exchange, so concurrent callers
  /// wait for one refresh instead of racing.
  async fn ensure_fresh_token(&self, endpoint: Endpoint) -> Result<Option<String>> {
    let mut session = self.session.lock().await;
    if endpoint.is_protected() {
      match session.refresh_decision(unix_now(), self.config.refresh_margin_secs)? {
        RefreshDecision::Fresh => {}
        RefreshDecision::Refresh(credentials) => {
          info!("Token expires within {}s, re-authenticating", self.config.refresh_margin_secs);
          let outcome = self.request_token(&credentials).await?;
          session.apply(outcome);
        }
        RefreshDecision::Borrowed => {
          debug!("Token close to expiry but no credentials stored, using it as is");
        }
      }
    }
    Ok(session.tokens.token().map(str::to_string))
  }

  /// The authentication exchange itself. Does not touch session state.
  async fn request_token(&self, credentials: &Credentials) -> Result<Option<(String, i64)>> {
    let request =
      HttpRequest::post(Endpoint::Auth.url(&self.config.base_url), credentials.to_body(), self.timeout());
    let response = self.transport.send(request).await?;
    let outcome = parse_token_response(&response)?;
    match &outcome {
      Some((_, expiry)) => info!("Authenticated as {}, token valid until {}", credentials.email, expiry),
      None => warn!("Token endpoint answered {}, keeping current token", response.status_code),
    }
    Ok(outcome)
  }

  fn timeout(&self) -> Duration {
    Duration::from_secs(self.config.timeout_secs)
  }
}

fn unix_now() -> i64 {
  chrono::Utc::now().timestamp()
}

impl std::fmt::Debug for OneMapClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OneMapClient")
      .field("config", &self.config)
      .field("transport", &"dyn HttpTransport")
      .finish_non_exhaustive()
  }
}
