//! Search endpoint models

use crate::common::{position_as_f64, GeoPosition, ModelError, ResponseModel};
use crate::raw::RawFields;
use serde::Serialize;
use serde_json::Value;

/// One match returned by the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResultItem {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub search_value: Option<String>,

  /// Block number
  #[serde(skip_serializing_if = "Option::is_none")]
  pub blk_no: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub road_name: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub building: Option<String>,

  /// Full formatted address
  #[serde(skip_serializing_if = "Option::is_none")]
  pub address: Option<String>,

  /// Six digit postal code
  #[serde(skip_serializing_if = "Option::is_none")]
  pub postal: Option<String>,

  /// SVY21 (X, Y)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub coordinates: Option<GeoPosition>,

  /// WGS84 (latitude, longitude)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lat_long: Option<GeoPosition>,
}

impl SearchResultItem {
  /// Latitude and longitude as numbers
  pub fn lat_long_f64(&self) -> Option<(f64, f64)> {
    self.lat_long.as_ref().and_then(position_as_f64)
  }

  /// SVY21 X and Y as numbers
  pub fn coordinates_f64(&self) -> Option<(f64, f64)> {
    self.coordinates.as_ref().and_then(position_as_f64)
  }
}

impl ResponseModel for SearchResultItem {
  const NAME: &'static str = "SearchResultItem";

  fn from_json(value: &Value) -> Result<Self, ModelError> {
    let raw = RawFields::new(Self::NAME, value)?;
    Ok(Self {
      search_value: raw.string(&["SEARCHVAL", "search_value"]),
      blk_no: raw.string(&["BLK_NO"]),
      road_name: raw.string(&["ROAD_NAME"]),
      building: raw.string(&["BUILDING"]),
      address: raw.string(&["ADDRESS"]),
      postal: raw.string(&["POSTAL"]),
      coordinates: raw.position(&["coordinates"], &["X"], &["Y"]),
      // LONGTITUDE is an upstream misspelling that duplicates LONGITUDE
      lat_long: raw.position(&["lat_long"], &["LATITUDE"], &["LONGITUDE", "LONGTITUDE"]),
    })
  }
}

/// A page of search matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
  /// Total number of matches across all pages
  #[serde(skip_serializing_if = "Option::is_none")]
  pub found: Option<i64>,

  pub total_num_pages: i64,

  pub page_num: i64,

  pub results: Vec<SearchResultItem>,
}

impl SearchResult {
  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  pub fn has_more_pages(&self) -> bool {
    self.page_num < self.total_num_pages
  }
}

impl ResponseModel for SearchResult {
  const NAME: &'static str = "SearchResult";

  fn from_json(value: &Value) -> Result<Self, ModelError> {
    let raw = RawFields::new(Self::NAME, value)?;
    Ok(Self {
      found: raw.integer(&["found"], "found")?,
      total_num_pages: raw.required_integer(&["totalNumPages"], "total_num_pages")?,
      page_num: raw.required_integer(&["pageNum"], "page_num")?,
      results: raw.list(&["results"], "results", SearchResultItem::from_json)?.unwrap_or_default(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn sample() -> Value {
    json!({
      "found": 2,
      "totalNumPages": 1,
      "pageNum": 1,
      "results": [
        {
          "SEARCHVAL": "INLAND REVENUE AUTHORITY OF SINGAPORE (IRAS)",
          "BLK_NO": "55",
          "ROAD_NAME": "NEWTON ROAD",
          "BUILDING": "INLAND REVENUE AUTHORITY OF SINGAPORE (IRAS)",
          "ADDRESS": "55 NEWTON ROAD, SINGAPORE 307987",
          "POSTAL": "307987",
          "X": "28983.7537272647",
          "Y": "33554.4361084122",
          "LATITUDE": "1.31972890510723",
          "LONGITUDE": "103.842158118267",
          "LONGTITUDE": "103.842158118267"
        },
        {
          "SEARCHVAL": "REVENUE HOUSE",
          "BLK_NO": "55",
          "ROAD_NAME": "NEWTON ROAD",
          "BUILDING": "REVENUE HOUSE",
          "ADDRESS": "55 NEWTON ROAD, SINGAPORE 307987",
          "POSTAL": "307987",
          "X": "28977.8507137401",
          "Y": "33547.5712691676",
          "LATITUDE": "1.31966682211667",
          "LONGITUDE": "103.842105076401",
          "LONGTITUDE": "103.842105076401"
        }
      ]
    })
  }

  #[test]
  fn test_search_result_from_payload() {
    let result = SearchResult::from_json(&sample()).unwrap();
    assert_eq!(result.found, Some(2));
    assert_eq!(result.total_num_pages, 1);
    assert_eq!(result.page_num, 1);
    assert!(!result.has_more_pages());
    assert_eq!(result.results.len(), 2);

    let first = &result.results[0];
    assert_eq!(first.search_value.as_deref(), Some("INLAND REVENUE AUTHORITY OF SINGAPORE (IRAS)"));
    assert_eq!(first.blk_no.as_deref(), Some("55"));
    assert_eq!(first.postal.as_deref(), Some("307987"));
    assert_eq!(
      first.coordinates,
      Some((Some("28983.7537272647".to_string()), Some("33554.4361084122".to_string())))
    );
    assert_eq!(first.lat_long_f64(), Some((1.31972890510723, 103.842158118267)));
    assert_eq!(result.results[1].search_value.as_deref(), Some("REVENUE HOUSE"));
  }

  #[test]
  fn test_missing_fields_stay_unset() {
    let item = SearchResultItem::from_json(&json!({"SEARCHVAL": "ONLY NAME", "UNKNOWN": 1})).unwrap();
    assert_eq!(item.search_value.as_deref(), Some("ONLY NAME"));
    assert!(item.blk_no.is_none());
    assert!(item.coordinates.is_none());
    assert!(item.lat_long.is_none());
  }

  #[test]
  fn test_misspelled_longitude_is_a_fallback_only() {
    let item = SearchResultItem::from_json(&json!({
      "LATITUDE": "1.3",
      "LONGTITUDE": "103.8"
    }))
    .unwrap();
    assert_eq!(item.lat_long_f64(), Some((1.3, 103.8)));
  }

  #[test]
  fn test_required_pagination() {
    let err = SearchResult::from_json(&json!({"pageNum": 1, "results": []})).unwrap_err();
    assert!(matches!(err, ModelError::MissingField { field: "total_num_pages", .. }));
  }

  #[test]
  fn test_results_absent_is_empty() {
    let result = SearchResult::from_json(&json!({"totalNumPages": 0, "pageNum": 1})).unwrap();
    assert!(result.is_empty());
    assert!(result.found.is_none());
  }

  #[test]
  fn test_to_dict() {
    let result = SearchResult::from_json(&sample()).unwrap();
    let dict = result.to_dict();
    assert_eq!(dict["found"], json!(2));
    assert_eq!(dict["total_num_pages"], json!(1));
    assert_eq!(dict["page_num"], json!(1));

    let item = &dict["results"][0];
    assert_eq!(item["search_value"], json!("INLAND REVENUE AUTHORITY OF SINGAPORE (IRAS)"));
    assert_eq!(item["road_name"], json!("NEWTON ROAD"));
    assert_eq!(item["coordinates"], json!(["28983.7537272647", "33554.4361084122"]));
    assert_eq!(item["lat_long"], json!(["1.31972890510723", "103.842158118267"]));
    assert!(item.get("LONGTITUDE").is_none());

    // the dict form maps back onto the same record
    assert_eq!(SearchResult::from_json(&dict).unwrap(), result);
  }
}
