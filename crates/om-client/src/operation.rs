//! Operation dispatch: each operation pairs a URL builder with the model its
//! response is parsed into.

use crate::query::{
  construct_reverse_geocode_query, construct_route_query, construct_search_query, Location,
  RouteType, TransitOptions,
};
use om_core::{Endpoint, Error, Result};
use om_models::{GeocodeInfo, ModelError, ResponseModel, RouteResult, SearchResult};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Coordinate system of a reverse geocode query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReverseType {
  Svy21,
  Wgs84,
}

impl ReverseType {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReverseType::Svy21 => "svy21",
      ReverseType::Wgs84 => "wgs84",
    }
  }
}

impl fmt::Display for ReverseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReverseType {
  type Err = Error;

  /// Exact match only
  fn from_str(s: &str) -> Result<Self> {
    match s {
      "svy21" => Ok(ReverseType::Svy21),
      "wgs84" => Ok(ReverseType::Wgs84),
      _ => Err(Error::InvalidInput(
        "`reverse_type` can only be either `svy21` or `wgs84`.".to_string(),
      )),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
  pub search_val: String,
  pub return_geometry: bool,
  pub get_address_details: bool,
  pub page_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteParams {
  pub start: String,
  pub end: String,
  pub route_type: RouteType,
  pub transit_options: Option<TransitOptions>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocodeParams {
  pub location: Location,
  pub buffer: u32,
  /// Already validated and lower-cased
  pub address_type: String,
  pub other_features: bool,
}

/// One API call with its validated arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
  Search(SearchParams),
  Route(RouteParams),
  ReverseGeocode(ReverseType, ReverseGeocodeParams),
}

impl Operation {
  pub fn endpoint(&self) -> Endpoint {
    match self {
      Operation::Search(_) => Endpoint::Search,
      Operation::Route(_) => Endpoint::Route,
      Operation::ReverseGeocode(..) => Endpoint::ReverseGeocode,
    }
  }

  /// Name used in logs, e.g. `reverse_geocode_wgs84`
  pub fn name(&self) -> String {
    match self {
      Operation::ReverseGeocode(kind, _) => format!("{}_{}", self.endpoint(), kind),
      _ => self.endpoint().to_string(),
    }
  }

  /// Full request URL. `token` is empty for anonymous calls.
  pub fn build_url(&self, base_url: &str, token: &str) -> Result<String> {
    match self {
      Operation::Search(p) => Ok(construct_search_query(
        base_url,
        &p.search_val,
        p.return_geometry,
        p.get_address_details,
        p.page_number,
      )),
      Operation::Route(p) => Ok(construct_route_query(
        base_url,
        &p.start,
        &p.end,
        p.route_type.as_str(),
        p.transit_options.as_ref(),
        token,
      )),
      // both coordinate systems share the request shape today
      Operation::ReverseGeocode(ReverseType::Svy21 | ReverseType::Wgs84, p) => {
        construct_reverse_geocode_query(
          base_url,
          &p.location,
          token,
          p.buffer,
          &p.address_type,
          p.other_features,
        )
      }
    }
  }

  /// Maps a 200 body into this operation's result model
  pub fn parse(&self, data: &Value) -> Result<ApiResult> {
    let parsed = match self {
      Operation::Search(_) => SearchResult::from_json(data).map(ApiResult::Search),
      Operation::Route(_) => RouteResult::from_json(data).map(ApiResult::Route),
      Operation::ReverseGeocode(ReverseType::Svy21 | ReverseType::Wgs84, _) => {
        GeocodeInfo::from_json(data).map(ApiResult::Geocode)
      }
    };
    parsed.map_err(model_error)
  }
}

/// Typed result of [`Operation::parse`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
  Search(SearchResult),
  Route(RouteResult),
  Geocode(GeocodeInfo),
}

impl ApiResult {
  pub fn into_search(self) -> Option<SearchResult> {
    match self {
      ApiResult::Search(r) => Some(r),
      _ => None,
    }
  }

  pub fn into_route(self) -> Option<RouteResult> {
    match self {
      ApiResult::Route(r) => Some(r),
      _ => None,
    }
  }

  pub fn into_geocode(self) -> Option<GeocodeInfo> {
    match self {
      ApiResult::Geocode(r) => Some(r),
      _ => None,
    }
  }

  /// `to_dict` of whichever model this holds
  pub fn to_dict(&self) -> Value {
    match self {
      ApiResult::Search(r) => r.to_dict(),
      ApiResult::Route(r) => r.to_dict(),
      ApiResult::Geocode(r) => r.to_dict(),
    }
  }
}

pub(crate) fn model_error(err: ModelError) -> Error {
  match err {
    ModelError::MissingField { model, field } => Error::MissingField(format!("{model}.{field}")),
    ModelError::Polyline(e) => Error::Polyline(e.to_string()),
    other => Error::InvalidResponse(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn geocode_op(kind: ReverseType) -> Operation {
    Operation::ReverseGeocode(
      kind,
      ReverseGeocodeParams {
        location: Location::from((1.3, 103.8)),
        buffer: 10,
        address_type: "all".to_string(),
        other_features: false,
      },
    )
  }

  #[test]
  fn test_reverse_type_is_exact() {
    assert_eq!("svy21".parse::<ReverseType>().unwrap(), ReverseType::Svy21);
    assert_eq!("wgs84".parse::<ReverseType>().unwrap(), ReverseType::Wgs84);
    for bad in ["SVY21", "wgs 84", "epsg4326", ""] {
      let err = bad.parse::<ReverseType>().unwrap_err();
      assert!(err.is_precondition(), "{bad} should be rejected");
    }
  }

  #[test]
  fn test_operation_endpoints_and_names() {
    let search = Operation::Search(SearchParams {
      search_val: "307987".to_string(),
      return_geometry: true,
      get_address_details: true,
      page_number: None,
    });
    assert_eq!(search.endpoint(), Endpoint::Search);
    assert_eq!(search.name(), "search");
    assert_eq!(geocode_op(ReverseType::Wgs84).name(), "reverse_geocode_wgs84");
    assert_eq!(geocode_op(ReverseType::Svy21).endpoint(), Endpoint::ReverseGeocode);
  }

  #[test]
  fn test_variants_share_url_shape() {
    let base = om_core::ONEMAP_BASE_URL;
    let svy = geocode_op(ReverseType::Svy21).build_url(base, "tok").unwrap();
    let wgs = geocode_op(ReverseType::Wgs84).build_url(base, "tok").unwrap();
    assert_eq!(svy, wgs);
    assert!(svy.contains("location=1.3,103.8&token=tok"));
  }

  #[test]
  fn test_parse_selects_model() {
    let op = geocode_op(ReverseType::Svy21);
    let result = op.parse(&json!({"GeocodeInfo": []})).unwrap();
    assert!(matches!(result, ApiResult::Geocode(_)));
    assert!(result.clone().into_search().is_none());
    assert_eq!(result.into_geocode().map(|g| g.len()), Some(0));
  }

  #[test]
  fn test_parse_reports_missing_fields() {
    let op = Operation::Search(SearchParams {
      search_val: "x".to_string(),
      return_geometry: true,
      get_address_details: true,
      page_number: None,
    });
    let err = op.parse(&json!({"pageNum": 1})).unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "SearchResult.total_num_pages"));

    let err = op.parse(&json!("not an object")).unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
  }
}
