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

//! Routing service models
//!
//! The routing endpoint answers in two unrelated shapes: an OSRM style route
//! for `walk`, `drive` and `cycle`, and an OpenTripPlanner style plan for
//! `pt`. [`RouteResult`] keeps them apart as two variants.

use crate::common::{LatLng, ModelError, ResponseModel};
use crate::polyline;
use crate::raw::{lenient_f64, RawFields};
use serde::Serialize;
use serde_json::Value;

/// Keys that only appear in public transport plans
const TRANSIT_KEYS: [&str; 4] = ["plan", "requestParameters", "debugOutput", "elevationMetadata"];

/// Start/end names with totals in seconds and metres
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteSummary {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_point: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_point: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_time: Option<f64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_distance: Option<f64>,
}

impl RouteSummary {
  /// Reads a summary object. Totals may be integers, floats or numeric strings.
  pub fn from_value(value: &Value) -> Option<Self> {
    let raw = RawFields::new("RouteSummary", value).ok()?;
    Some(Self {
      start_point: raw.string(&["start_point"]),
      end_point: raw.string(&["end_point"]),
      total_time: raw.number(&["total_time"]),
      total_distance: raw.number(&["total_distance"]),
    })
  }
}

/// A single turn instruction.
///
/// OneMap sends instructions as positional arrays such as
/// `["10", "PANDAN LOOP", 853, 0, 89, "853m", "NE", 65, 1, "SW", 245]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInstruction {
  pub direction: String,
  pub road_name: String,
  pub distance: f64,
  pub position: u64,
  pub time: f64,
  pub formatted_distance: String,
  pub heading: String,
  pub azimuth: f64,
}

impl RouteInstruction {
  /// Reads the positional form, `None` if the array is too short or mistyped
  pub fn from_raw(value: &Value) -> Option<Self> {
    let items = value.as_array()?;
    let text = |i: usize| -> Option<String> {
      match items.get(i)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
      }
    };
    let number = |i: usize| items.get(i).and_then(lenient_f64);
    Some(Self {
      direction: text(0)?,
      road_name: text(1)?,
      distance: number(2)?,
      position: number(3)? as u64,
      time: number(4)?,
      formatted_distance: text(5)?,
      heading: text(6)?,
      azimuth: number(7)?,
    })
  }
}

/// Walk, drive or cycle route.
///
/// Fields hold the payload values exactly as received, so `to_dict` gives
/// them back unchanged whatever their upstream type. The accessor methods
/// read them into Rust types and skip anything that does not fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicularRoute {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_message: Option<Value>,

  /// Upstream status, mirrors the HTTP code on success
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub route_name: Option<Value>,

  /// Encoded polyline, precision 5
  #[serde(skip_serializing_if = "Option::is_none")]
  pub route_geometry: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub route_instructions: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub route_summary: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub via_points: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub via_indices: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub hint_data: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub found_alternative: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative_names: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative_geometries: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative_instructions: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative_summaries: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative_indices: Option<Value>,
}

impl VehicularRoute {
  /// Decodes `route_geometry` into (latitude, longitude) points.
  ///
  /// Not cached: every call decodes again. `Ok(None)` when no geometry is set.
  pub fn lat_longs(&self) -> Result<Option<Vec<LatLng>>, ModelError> {
    self
      .route_geometry
      .as_deref()
      .map(polyline::decode_default)
      .transpose()
      .map_err(ModelError::from)
  }

  /// Decodes every alternative geometry, in order
  pub fn alternative_lat_longs(&self) -> Result<Vec<Vec<LatLng>>, ModelError> {
    elements(&self.alternative_geometries)
      .filter_map(Value::as_str)
      .map(|g| polyline::decode_default(g).map_err(ModelError::from))
      .collect()
  }

  /// `status` as a number, whether sent as `0` or `"0"`
  pub fn status_code(&self) -> Option<i64> {
    match self.status.as_ref()? {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }

  pub fn route_names(&self) -> Vec<String> {
    elements(&self.route_name).filter_map(|v| v.as_str().map(str::to_string)).collect()
  }

  pub fn summary(&self) -> Option<RouteSummary> {
    self.route_summary.as_ref().and_then(RouteSummary::from_value)
  }

  pub fn alternative_route_summaries(&self) -> Vec<RouteSummary> {
    elements(&self.alternative_summaries).filter_map(RouteSummary::from_value).collect()
  }

  pub fn via_point_indices(&self) -> Vec<u64> {
    index_list(&self.via_indices)
  }

  pub fn alternative_route_indices(&self) -> Vec<u64> {
    index_list(&self.alternative_indices)
  }

  /// `via_points` as (latitude, longitude) pairs
  pub fn via_lat_longs(&self) -> Vec<LatLng> {
    elements(&self.via_points)
      .filter_map(|point| {
        let pair = point.as_array()?;
        Some((lenient_f64(pair.first()?)?, lenient_f64(pair.get(1)?)?))
      })
      .collect()
  }

  pub fn has_alternative(&self) -> bool {
    match &self.found_alternative {
      Some(Value::Bool(found)) => *found,
      Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
      _ => false,
    }
  }

  /// Parsed turn instructions; malformed entries are skipped
  pub fn instructions(&self) -> Vec<RouteInstruction> {
    elements(&self.route_instructions).filter_map(RouteInstruction::from_raw).collect()
  }

  fn from_fields(raw: &RawFields<'_>) -> Self {
    let keep = |key: &str| raw.get(&[key]).cloned();
    Self {
      status_message: keep("status_message"),
      status: keep("status"),
      route_name: keep("route_name"),
      route_geometry: raw.string(&["route_geometry"]),
      route_instructions: keep("route_instructions"),
      route_summary: keep("route_summary"),
      via_points: keep("via_points"),
      via_indices: keep("via_indices"),
      hint_data: keep("hint_data"),
      found_alternative: keep("found_alternative"),
      alternative_names: keep("alternative_names"),
      alternative_geometries: keep("alternative_geometries"),
      alternative_instructions: keep("alternative_instructions"),
      alternative_summaries: keep("alternative_summaries"),
      alternative_indices: keep("alternative_indices"),
    }
  }
}

/// Items of an array field; nothing for a missing or non-array value
fn elements(field: &Option<Value>) -> impl Iterator<Item = &Value> {
  field.as_ref().and_then(Value::as_array).into_iter().flatten()
}

fn index_list(field: &Option<Value>) -> Vec<u64> {
  elements(field)
    .filter_map(|v| match v {
      Value::Number(n) => n.as_u64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    })
    .collect()
}

/// Public transport plan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitPlan {
  /// Echo of the query, from `requestParameters`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_parameters: Option<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub plan: Option<Value>,

  /// From `debugOutput`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub debug_output: Option<Value>,

  /// From `elevationMetadata`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub elevation_metadata: Option<Value>,
}

impl TransitPlan {
  /// `plan.itineraries`, empty when the plan has none
  pub fn itineraries(&self) -> &[Value] {
    self
      .plan
      .as_ref()
      .and_then(|p| p.get("itineraries"))
      .and_then(Value::as_array)
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  /// Decodes the `legGeometry.points` of each leg in one itinerary
  pub fn itinerary_lat_longs(&self, index: usize) -> Result<Vec<Vec<LatLng>>, ModelError> {
    let Some(legs) = self.itineraries().get(index).and_then(|i| i.get("legs")).and_then(Value::as_array)
    else {
      return Ok(Vec::new());
    };
    legs
      .iter()
      .filter_map(|leg| leg.pointer("/legGeometry/points").and_then(Value::as_str))
      .map(|points| polyline::decode_default(points).map_err(ModelError::from))
      .collect()
  }

  fn from_fields(raw: &RawFields<'_>) -> Self {
    Self {
      request_parameters: raw.get(&["requestParameters"]).cloned(),
      plan: raw.get(&["plan"]).cloned(),
      debug_output: raw.get(&["debugOutput"]).cloned(),
      elevation_metadata: raw.get(&["elevationMetadata"]).cloned(),
    }
  }
}

/// Routing response, discriminated by the keys present in the payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteResult {
  Vehicular(VehicularRoute),
  Transit(TransitPlan),
}

impl RouteResult {
  pub fn as_vehicular(&self) -> Option<&VehicularRoute> {
    match self {
      RouteResult::Vehicular(route) => Some(route),
      RouteResult::Transit(_) => None,
    }
  }

  pub fn as_transit(&self) -> Option<&TransitPlan> {
    match self {
      RouteResult::Transit(plan) => Some(plan),
      RouteResult::Vehicular(_) => None,
    }
  }

  pub fn is_transit(&self) -> bool {
    matches!(self, RouteResult::Transit(_))
  }

  /// Decoded main geometry; always `Ok(None)` for transit plans
  pub fn lat_longs(&self) -> Result<Option<Vec<LatLng>>, ModelError> {
    match self {
      RouteResult::Vehicular(route) => route.lat_longs(),
      RouteResult::Transit(_) => Ok(None),
    }
  }
}

impl ResponseModel for RouteResult {
  const NAME: &'static str = "RouteResult";

  fn from_json(value: &Value) -> Result<Self, ModelError> {
    let raw = RawFields::new(Self::NAME, value)?;
    Ok(if raw.contains(&TRANSIT_KEYS) {
      RouteResult::Transit(TransitPlan::from_fields(&raw))
    } else {
      RouteResult::Vehicular(VehicularRoute::from_fields(&raw))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use om_core::test_utils::assert_lat_longs_eq;
  use serde_json::json;

  const GEOMETRY: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

  fn drive_payload() -> Value {
    json!({
      "status_message": "Found route between points",
      "alternative_names": [["COMMONWEALTH AVENUE WEST", "NORTH BUONA VISTA ROAD"]],
      "route_name": ["CLEMENTI AVENUE 2", "ULU PANDAN ROAD"],
      "route_geometry": GEOMETRY,
      "route_instructions": [
        ["10", "PANDAN LOOP", 853, 0, 89, "853m", "NE", 65, 1, "SW", 245],
        ["8", "JALAN BUROH", 217, 9, 23, "217m", "NE", 50, 1, "SW", 230]
      ],
      "alternative_summaries": [
        {"end_point": "REBECCA ROAD", "start_point": "PANDAN LOOP", "total_time": 761, "total_distance": 8133}
      ],
      "via_points": [[1.311549, 103.749657], [1.32036, 103.800156]],
      "route_summary": {
        "end_point": "REBECCA ROAD",
        "start_point": "PANDAN LOOP",
        "total_time": 740,
        "total_distance": 7957
      },
      "found_alternative": true,
      "status": 200,
      "via_indices": [0, 140],
      "hint_data": {
        "locations": [
          "NzgBANtqAQBRBQAAAAAAAAQAAAAAAAAAuQIAAEOcAABoAAAAPQMUABcYLwYAAAEB",
          "0OUAAF4zAQChAwAABAAAAAwAAABIAAAAdQAAACx9AABoAAAAqCUUAFndLwYCAAEB"
        ],
        "checksum": 585417468
      },
      "alternative_geometries": [GEOMETRY],
      "alternative_instructions": [
        [["10", "PANDAN LOOP", 853, 0, 89, "853m", "NE", 65, 1, "SW", 245]]
      ],
      "alternative_indices": [0, 159]
    })
  }

  fn transit_payload() -> Value {
    json!({
      "requestParameters": {"date": "09-01-2018", "time": "15:30:00", "mode": "TRANSIT"},
      "plan": {
        "date": 1535787000000_u64,
        "itineraries": [
          {
            "duration": 1800,
            "legs": [
              {"mode": "WALK", "legGeometry": {"points": GEOMETRY, "length": 3}},
              {"mode": "BUS", "legGeometry": {"points": "_p~iF~ps|U", "length": 1}}
            ]
          }
        ]
      },
      "debugOutput": {"totalTime": 221},
      "elevationMetadata": {"ellipsoidToGeoidDifference": 7.1, "geoidElevation": false}
    })
  }

  #[test]
  fn test_drive_route_fields() {
    let result = RouteResult::from_json(&drive_payload()).unwrap();
    let route = result.as_vehicular().expect("vehicular route");
    assert!(!result.is_transit());
    assert_eq!(route.status_message, Some(json!("Found route between points")));
    assert_eq!(route.status_code(), Some(200));
    assert!(route.has_alternative());
    assert_eq!(route.summary().and_then(|s| s.total_distance), Some(7957.0));
    assert_eq!(route.via_point_indices(), vec![0, 140]);
    assert_eq!(route.alternative_route_indices(), vec![0, 159]);
    assert_eq!(route.route_names(), vec!["CLEMENTI AVENUE 2", "ULU PANDAN ROAD"]);
    assert_eq!(route.alternative_route_summaries()[0].end_point.as_deref(), Some("REBECCA ROAD"));
    assert_lat_longs_eq(&route.via_lat_longs(), &[(1.311549, 103.749657), (1.32036, 103.800156)]);
  }

  #[test]
  fn test_every_declared_field_round_trips() {
    let input = drive_payload();
    let dict = RouteResult::from_json(&input).unwrap().to_dict();
    let input = input.as_object().unwrap();
    assert_eq!(dict.as_object().unwrap().len(), input.len());
    for (key, value) in input {
      assert_eq!(&dict[key], value, "field {key} changed");
    }
  }

  #[test]
  fn test_lat_longs_decodes_geometry() {
    let result = RouteResult::from_json(&drive_payload()).unwrap();
    let points = result.lat_longs().unwrap().unwrap();
    assert_lat_longs_eq(&points, &polyline::decode_default(GEOMETRY).unwrap());
    assert_lat_longs_eq(&points, &[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]);

    let alternatives = result.as_vehicular().unwrap().alternative_lat_longs().unwrap();
    assert_eq!(alternatives.len(), 1);
  }

  #[test]
  fn test_lat_longs_follows_geometry() {
    let mut route = VehicularRoute { route_geometry: Some(GEOMETRY.to_string()), ..Default::default() };
    assert_eq!(route.lat_longs().unwrap().map(|p| p.len()), Some(3));

    route.route_geometry = None;
    assert!(route.lat_longs().unwrap().is_none());

    route.route_geometry = Some("_p~iF".to_string());
    assert!(matches!(route.lat_longs(), Err(ModelError::Polyline(_))));
  }

  #[test]
  fn test_instructions() {
    let result = RouteResult::from_json(&drive_payload()).unwrap();
    let instructions = result.as_vehicular().unwrap().instructions();
    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].road_name, "PANDAN LOOP");
    assert_eq!(instructions[0].distance, 853.0);
    assert_eq!(instructions[1].formatted_distance, "217m");
    assert_eq!(instructions[1].heading, "NE");
    assert!(RouteInstruction::from_raw(&json!(["10", "SHORT"])).is_none());
  }

  #[test]
  fn test_transit_plan() {
    let result = RouteResult::from_json(&transit_payload()).unwrap();
    assert!(result.is_transit());
    assert!(result.lat_longs().unwrap().is_none());

    let plan = result.as_transit().unwrap();
    assert_eq!(
      plan.request_parameters.as_ref().and_then(|p| p.get("mode")),
      Some(&json!("TRANSIT"))
    );
    assert_eq!(plan.debug_output, Some(json!({"totalTime": 221})));
    assert_eq!(plan.itineraries().len(), 1);

    let legs = plan.itinerary_lat_longs(0).unwrap();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0].len(), 3);
    assert_eq!(legs[1].len(), 1);
    assert!(plan.itinerary_lat_longs(5).unwrap().is_empty());
  }

  #[test]
  fn test_transit_to_dict_uses_snake_case() {
    let input = transit_payload();
    let dict = RouteResult::from_json(&input).unwrap().to_dict();
    assert_eq!(dict["request_parameters"], input["requestParameters"]);
    assert_eq!(dict["plan"], input["plan"]);
    assert_eq!(dict["debug_output"], input["debugOutput"]);
    assert_eq!(dict["elevation_metadata"], input["elevationMetadata"]);
    assert!(dict.get("route_geometry").is_none());
  }

  #[test]
  fn test_loosely_typed_fields_are_kept_verbatim() {
    let input = json!({
      "status": "0",
      "status_message": 5,
      "route_summary": {"start_point": "PANDAN LOOP", "total_time": 740.5, "total_distance": "7957"},
      "via_indices": "zero",
      "found_alternative": "true"
    });
    let result = RouteResult::from_json(&input).unwrap();
    assert_eq!(result.to_dict(), input);

    let route = result.as_vehicular().unwrap();
    assert_eq!(route.status_code(), Some(0));
    let summary = route.summary().unwrap();
    assert_eq!(summary.total_time, Some(740.5));
    assert_eq!(summary.total_distance, Some(7957.0));
    assert!(route.via_point_indices().is_empty());
    assert!(route.has_alternative());
  }

  #[test]
  fn test_empty_payload_is_empty_route() {
    let result = RouteResult::from_json(&json!({})).unwrap();
    assert_eq!(result, RouteResult::Vehicular(VehicularRoute::default()));
    assert_eq!(result.to_dict(), json!({}));
  }
}
