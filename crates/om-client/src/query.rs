//! Request URL construction for each OneMap operation.
//!
//! These are pure functions: they validate their own arguments and return a
//! complete URL, but never touch the network.

use om_core::{Endpoint, Error, Result, ONEMAP_BASE_URL};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded::byte_serialize;

/// Default search radius for reverse geocoding, in metres
pub const DEFAULT_BUFFER: u32 = 10;

/// Default address filter for reverse geocoding
pub const DEFAULT_ADDRESS_TYPE: &str = "all";

/// Travel mode for the routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
  Walk,
  Drive,
  Cycle,
  /// Public transport
  Pt,
}

impl RouteType {
  pub fn as_str(&self) -> &'static str {
    match self {
      RouteType::Walk => "walk",
      RouteType::Drive => "drive",
      RouteType::Cycle => "cycle",
      RouteType::Pt => "pt",
    }
  }
}

impl fmt::Display for RouteType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for RouteType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "walk" => Ok(RouteType::Walk),
      "drive" => Ok(RouteType::Drive),
      "cycle" => Ok(RouteType::Cycle),
      "pt" => Ok(RouteType::Pt),
      other => Err(Error::InvalidInput(format!(
        "Invalid `routeType` value {other:?} - can only be `walk`, `drive`, `cycle` or `pt`"
      ))),
    }
  }
}

/// Extra query parameters for public transport routing, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitOptions {
  params: Vec<(String, String)>,
}

impl TransitOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Travel date, `MM-DD-YYYY`
  pub fn date(self, date: impl Into<String>) -> Self {
    self.extra("date", date)
  }

  /// Departure time, `HH:MM:SS`
  pub fn time(self, time: impl Into<String>) -> Self {
    self.extra("time", time)
  }

  /// `TRANSIT`, `BUS` or `RAIL`
  pub fn mode(self, mode: impl Into<String>) -> Self {
    self.extra("mode", mode)
  }

  /// In metres
  pub fn max_walk_distance(self, metres: u32) -> Self {
    self.extra("maxWalkDistance", metres.to_string())
  }

  pub fn num_itineraries(self, count: u32) -> Self {
    self.extra("numItineraries", count.to_string())
  }

  /// Any other parameter. Setting a key again replaces its value in place.
  pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    let (key, value) = (key.into(), value.into());
    match self.params.iter_mut().find(|(k, _)| *k == key) {
      Some(existing) => existing.1 = value,
      None => self.params.push((key, value)),
    }
    self
  }

  pub fn is_empty(&self) -> bool {
    self.params.is_empty()
  }

  pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
    self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransitOptions {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    iter.into_iter().fold(TransitOptions::new(), |opts, (k, v)| opts.extra(k, v))
  }
}

/// A coordinate pair for reverse geocoding: SVY21 (X, Y) or WGS84 (lat, long)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
  first: String,
  second: String,
}

impl Location {
  pub fn new(first: impl fmt::Display, second: impl fmt::Display) -> Self {
    Self { first: first.to_string().trim().to_string(), second: second.to_string().trim().to_string() }
  }

  /// `first,second`, the form OneMap expects
  pub fn to_query_value(&self) -> String {
    format!("{},{}", self.first, self.second)
  }
}

/// Floats keep their decimal point, so `(1.0, 2.0)` is sent as `1.0,2.0`
impl From<(f64, f64)> for Location {
  fn from((a, b): (f64, f64)) -> Self {
    Location { first: format!("{a:?}"), second: format!("{b:?}") }
  }
}

impl From<(&str, &str)> for Location {
  fn from((a, b): (&str, &str)) -> Self {
    Location::new(a, b)
  }
}

impl From<(String, String)> for Location {
  fn from((a, b): (String, String)) -> Self {
    Location::new(a, b)
  }
}

/// Accepts `all` or `hdb` in any case and returns it lower-cased
pub fn validate_address_type(address_type: &str) -> Result<String> {
  let lowered = address_type.to_lowercase();
  match lowered.as_str() {
    "all" | "hdb" => Ok(lowered),
    _ => Err(Error::InvalidInput(
      "Invalid `addressType` value - can only be `HDB` or `All`".to_string(),
    )),
  }
}

fn yes_no(flag: bool) -> &'static str {
  if flag {
    "Y"
  } else {
    "N"
  }
}

/// Form-encodes `key=value` pairs. With `keep_separators`, `,` and `:` stay
/// literal so coordinates and times read naturally.
fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>, keep_separators: bool) -> String {
  let encode = |raw: &str| -> String {
    let encoded: String = byte_serialize(raw.as_bytes()).collect();
    if keep_separators {
      encoded.replace("%2C", ",").replace("%3A", ":")
    } else {
      encoded
    }
  };
  pairs
    .into_iter()
    .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
    .collect::<Vec<_>>()
    .join("&")
}

/// Search URL. `page_number` defaults to 1.
pub fn construct_search_query(
  base_url: &str,
  search_val: &str,
  return_geometry: bool,
  get_address_details: bool,
  page_number: Option<u32>,
) -> String {
  let page = page_number.filter(|p| *p > 0).unwrap_or(1).to_string();
  let params = [
    ("searchVal", search_val),
    ("returnGeom", yes_no(return_geometry)),
    ("getAddrDetails", yes_no(get_address_details)),
    ("pageNum", page.as_str()),
  ];
  format!("{}?{}", Endpoint::Search.url(base_url), encode_pairs(params, false))
}

/// Routing URL. Transit options are only sent for `pt`; the token goes last.
pub fn construct_route_query(
  base_url: &str,
  start: &str,
  end: &str,
  route_type: &str,
  options: Option<&TransitOptions>,
  token: &str,
) -> String {
  let mut params: Vec<(&str, &str)> = vec![("start", start), ("end", end), ("routeType", route_type)];
  if route_type == RouteType::Pt.as_str() {
    // options win over the base parameters of the same name
    for (key, value) in options.into_iter().flat_map(TransitOptions::pairs) {
      match params.iter_mut().find(|(k, _)| *k == key) {
        Some(existing) => existing.1 = value,
        None => params.push((key, value)),
      }
    }
  }
  format!("{}?{}&token={}", Endpoint::Route.url(base_url), encode_pairs(params, true), token)
}

/// Reverse geocode URL, shared by the SVY21 and WGS84 variants
pub fn construct_reverse_geocode_query(
  base_url: &str,
  location: &Location,
  token: &str,
  buffer: u32,
  address_type: &str,
  other_features: bool,
) -> Result<String> {
  let location = location.to_query_value();
  let buffer = buffer.to_string();
  let address_type = validate_address_type(address_type)?;
  let params = [
    ("location", location.as_str()),
    ("token", token),
    ("buffer", buffer.as_str()),
    ("addressType", address_type.as_str()),
    ("otherFeatures", yes_no(other_features)),
  ];
  Ok(format!("{}?{}", Endpoint::ReverseGeocode.url(base_url), encode_pairs(params, true)))
}

/// [`construct_search_query`] against the public OneMap server
pub fn search_url(search_val: &str, return_geometry: bool, get_address_details: bool, page_number: Option<u32>) -> String {
  construct_search_query(ONEMAP_BASE_URL, search_val, return_geometry, get_address_details, page_number)
}

/// [`construct_route_query`] against the public OneMap server
pub fn route_url(start: &str, end: &str, route_type: &str, options: Option<&TransitOptions>, token: &str) -> String {
  construct_route_query(ONEMAP_BASE_URL, start, end, route_type, options, token)
}

/// [`construct_reverse_geocode_query`] against the public OneMap server
pub fn reverse_geocode_url(
  location: &Location,
  token: &str,
  buffer: u32,
  address_type: &str,
  other_features: bool,
) -> Result<String> {
  construct_reverse_geocode_query(ONEMAP_BASE_URL, location, token, buffer, address_type, other_features)
}
