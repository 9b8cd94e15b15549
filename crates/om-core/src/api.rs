//! Static endpoint table for the OneMap SG API

use std::fmt;

/// Base URL for the OneMap SG developer API
pub const ONEMAP_BASE_URL: &str = "https://developers.onemap.sg/";

/// Path segment marking endpoints that require a bearer token
pub const PRIVATE_API_SEGMENT: &str = "privateapi";

/// The logical endpoints exposed by OneMap.
///
/// Both reverse geocode variants (SVY21 and WGS84) share one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  Auth,
  Search,
  Route,
  ReverseGeocode,
}

impl Endpoint {
  pub const ALL: [Endpoint; 4] =
    [Endpoint::Auth, Endpoint::Search, Endpoint::Route, Endpoint::ReverseGeocode];

  /// Path relative to the base URL
  pub fn path(&self) -> &'static str {
    match self {
      Endpoint::Auth => "privateapi/auth/post/getToken",
      Endpoint::Search => "commonapi/search",
      Endpoint::Route => "privateapi/routingsvc/route",
      Endpoint::ReverseGeocode => "privateapi/commonsvc/revgeocodexy",
    }
  }

  /// Full URL under `base_url`. A missing trailing slash on the base is tolerated.
  pub fn url(&self, base_url: &str) -> String {
    if base_url.ends_with('/') {
      format!("{}{}", base_url, self.path())
    } else {
      format!("{}/{}", base_url, self.path())
    }
  }

  /// Full URL under [`ONEMAP_BASE_URL`]
  pub fn default_url(&self) -> String {
    self.url(ONEMAP_BASE_URL)
  }

  /// Protected endpoints need a valid token
  pub fn is_protected(&self) -> bool {
    self.path().contains(PRIVATE_API_SEGMENT)
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Endpoint::Auth => write!(f, "auth"),
      Endpoint::Search => write!(f, "search"),
      Endpoint::Route => write!(f, "route"),
      Endpoint::ReverseGeocode => write!(f, "reverse_geocode"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_urls_prefix_base() {
    for endpoint in Endpoint::ALL {
      assert_eq!(endpoint.default_url(), format!("{}{}", ONEMAP_BASE_URL, endpoint.path()));
    }
    assert_eq!(
      Endpoint::Search.url("http://127.0.0.1:8080"),
      "http://127.0.0.1:8080/commonapi/search"
    );
  }

  #[test]
  fn test_protected_endpoints() {
    assert!(Endpoint::Auth.is_protected());
    assert!(Endpoint::Route.is_protected());
    assert!(Endpoint::ReverseGeocode.is_protected());
    assert!(!Endpoint::Search.is_protected());
  }

  #[test]
  fn test_display() {
    assert_eq!(Endpoint::ReverseGeocode.to_string(), "reverse_geocode");
    assert_eq!(Endpoint::Auth.to_string(), "auth");
  }
}
