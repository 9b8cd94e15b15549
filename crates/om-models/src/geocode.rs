//! Reverse geocode models (shared by the SVY21 and WGS84 variants)

use crate::common::{position_as_f64, GeoPosition, ModelError, ResponseModel};
use crate::raw::RawFields;
use serde::Serialize;
use serde_json::Value;

/// A building or feature near the queried location
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocodeInfoItem {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub building_name: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub block: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub road: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal_code: Option<String>,

  /// Only present when `otherFeatures=Y` matched a non-building feature
  #[serde(skip_serializing_if = "Option::is_none")]
  pub feature_name: Option<String>,

  /// SVY21 (X, Y)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coordinates: Option<GeoPosition>,

  /// WGS84 (latitude, longitude)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lat_long: Option<GeoPosition>,
}

impl GeocodeInfoItem {
  pub fn lat_long_f64(&self) -> Option<(f64, f64)> {
    self.lat_long.as_ref().and_then(position_as_f64)
  }

  pub fn coordinates_f64(&self) -> Option<(f64, f64)> {
    self.coordinates.as_ref().and_then(position_as_f64)
  }
}

impl ResponseModel for GeocodeInfoItem {
  const NAME: &'static str = "GeocodeInfoItem";

  fn from_json(value: &Value) -> Result<Self, ModelError> {
    let raw = RawFields::new(Self::NAME, value)?;
    Ok(Self {
      building_name: raw.string(&["BUILDINGNAME"]),
      block: raw.string(&["BLOCK"]),
      road: raw.string(&["ROAD"]),
      postal_code: raw.string(&["POSTALCODE"]),
      feature_name: raw.string(&["FEATURE_NAME"]),
      coordinates: raw.position(&["coordinates"], &["XCOORD"], &["YCOORD"]),
      lat_long: raw.position(&["lat_long"], &["LATITUDE"], &["LONGITUDE", "LONGTITUDE"]),
    })
  }
}

/// Reverse geocode response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeocodeInfo {
  /// `None` when the payload carried no `GeocodeInfo` list at all
  #[serde(skip_serializing_if = "Option::is_none")]
  pub results: Option<Vec<GeocodeInfoItem>>,
}

impl GeocodeInfo {
  pub fn len(&self) -> usize {
    self.results.as_ref().map_or(0, Vec::len)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Iterates the matches, empty when none were returned
  pub fn iter(&self) -> impl Iterator<Item = &GeocodeInfoItem> {
    self.results.iter().flatten()
  }
}

impl ResponseModel for GeocodeInfo {
  const NAME: &'static str = "GeocodeInfo";

  fn from_json(value: &Value) -> Result<Self, ModelError> {
    let raw = RawFields::new(Self::NAME, value)?;
    Ok(Self { results: raw.list(&["GeocodeInfo", "results"], "results", GeocodeInfoItem::from_json)? })
  }
}
