//! Field lookup over raw OneMap JSON objects.
//!
//! OneMap mixes `UPPERCASE`, `snake_case` and `camelCase` keys across its
//! endpoints. Every model declares the raw keys each of its fields accepts
//! and looks them up here. Keys are compared after folding: ASCII case is
//! ignored and underscores are dropped, so `BLK_NO`, `blk_no` and `blkNo`
//! all match. Unknown keys are ignored.

use crate::common::{GeoPosition, ModelError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Folds a key for comparison
pub fn fold_key(key: &str) -> String {
  key.chars().filter(|c| *c != '_').map(|c| c.to_ascii_lowercase()).collect()
}

/// Read-only view over one raw JSON object, tagged with the model being built.
#[derive(Debug, Clone, Copy)]
pub struct RawFields<'a> {
  model: &'static str,
  map: &'a Map<String, Value>,
}

impl<'a> RawFields<'a> {
  pub fn new(model: &'static str, value: &'a Value) -> Result<Self, ModelError> {
    match value {
      Value::Object(map) => Ok(Self { model, map }),
      other => Err(ModelError::NotAnObject { model, found: json_kind(other) }),
    }
  }

  pub fn model(&self) -> &'static str {
    self.model
  }

  /// First non-null value matching an alias. Earlier aliases win.
  pub fn get(&self, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
      let wanted = fold_key(alias);
      self
        .map
        .iter()
        .find(|(key, value)| !value.is_null() && fold_key(key) == wanted)
        .map(|(_, value)| value)
    })
  }

  pub fn contains(&self, aliases: &[&str]) -> bool {
    self.get(aliases).is_some()
  }

  /// String field. Numbers and booleans are kept as their JSON text.
  pub fn string(&self, aliases: &[&str]) -> Option<String> {
    self.get(aliases).and_then(scalar_to_string)
  }

  /// Numeric field, lenient: integers, floats and numeric strings all read,
  /// anything else is `None`.
  pub fn number(&self, aliases: &[&str]) -> Option<f64> {
    self.get(aliases).and_then(lenient_f64)
  }

  /// Integer field. OneMap sometimes sends integers as numeric strings.
  pub fn integer(&self, aliases: &[&str], field: &'static str) -> Result<Option<i64>, ModelError> {
    match self.get(aliases) {
      None => Ok(None),
      Some(Value::Number(n)) => n
        .as_i64()
        .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        .map(Some)
        .ok_or_else(|| self.invalid(field, format!("{n} is not an integer"))),
      Some(Value::String(s)) => s
        .trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| self.invalid(field, format!("{s:?} is not an integer"))),
      Some(other) => Err(self.invalid(field, format!("expected integer, got {}", json_kind(other)))),
    }
  }

  pub fn required_integer(&self, aliases: &[&str], field: &'static str) -> Result<i64, ModelError> {
    self.integer(aliases, field)?.ok_or(ModelError::MissingField { model: self.model, field })
  }

  /// Any serde-deserializable field
  pub fn typed<T: DeserializeOwned>(
    &self,
    aliases: &[&str],
    field: &'static str,
  ) -> Result<Option<T>, ModelError> {
    self
      .get(aliases)
      .map(|value| {
        serde_json::from_value(value.clone()).map_err(|e| self.invalid(field, e.to_string()))
      })
      .transpose()
  }

  /// Combines two scalar keys into one position pair.
  ///
  /// A two-element array under `combined` (the shape `to_dict` emits) is
  /// accepted as well. Returns `None` when neither half is present.
  pub fn position(&self, combined: &[&str], first: &[&str], second: &[&str]) -> Option<GeoPosition> {
    if let Some(Value::Array(items)) = self.get(combined) {
      if items.len() == 2 {
        return Some((scalar_to_string(&items[0]), scalar_to_string(&items[1])));
      }
    }
    let pair = (self.string(first), self.string(second));
    match pair {
      (None, None) => None,
      pair => Some(pair),
    }
  }

  /// Builds each element of an array field with `build`, keeping input order.
  pub fn list<T>(
    &self,
    aliases: &[&str],
    field: &'static str,
    build: impl Fn(&Value) -> Result<T, ModelError>,
  ) -> Result<Option<Vec<T>>, ModelError> {
    match self.get(aliases) {
      None => Ok(None),
      Some(Value::Array(items)) => items.iter().map(build).collect::<Result<Vec<_>, _>>().map(Some),
      Some(other) => Err(self.invalid(field, format!("expected array, got {}", json_kind(other)))),
    }
  }

  fn invalid(&self, field: &'static str, reason: String) -> ModelError {
    ModelError::InvalidField { model: self.model, field, reason }
  }
}

/// A JSON number, or a string holding one
pub fn lenient_f64(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

fn scalar_to_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_fold_key() {
    assert_eq!(fold_key("BLK_NO"), "blkno");
    assert_eq!(fold_key("totalNumPages"), fold_key("total_num_pages"));
    assert_ne!(fold_key("LONGTITUDE"), fold_key("LONGITUDE"));
  }

  #[test]
  fn test_get_skips_nulls_and_unknown_keys() {
    let value = json!({"ROAD_NAME": null, "road_name": "NEWTON ROAD", "EXTRA": 1});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(fields.string(&["road_name"]).as_deref(), Some("NEWTON ROAD"));
    assert!(fields.get(&["missing"]).is_none());
  }

  #[test]
  fn test_not_an_object() {
    let err = RawFields::new("Test", &json!([1, 2])).unwrap_err();
    assert!(matches!(err, ModelError::NotAnObject { found: "array", .. }));
  }

  #[test]
  fn test_integer_coercion() {
    let value = json!({"a": "123456", "b": 7, "c": "x", "d": 2.0});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(fields.integer(&["a"], "a").unwrap(), Some(123456));
    assert_eq!(fields.integer(&["b"], "b").unwrap(), Some(7));
    assert_eq!(fields.integer(&["d"], "d").unwrap(), Some(2));
    assert!(fields.integer(&["c"], "c").is_err());
    assert!(matches!(
      fields.required_integer(&["z"], "z"),
      Err(ModelError::MissingField { field: "z", .. })
    ));
  }

  #[test]
  fn test_position_from_halves_and_tuple() {
    let value = json!({"X": "1.5", "Y": 2.25});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(
      fields.position(&["coordinates"], &["X"], &["Y"]),
      Some((Some("1.5".to_string()), Some("2.25".to_string())))
    );

    let value = json!({"coordinates": ["1.5", "2.25"]});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(
      fields.position(&["coordinates"], &["X"], &["Y"]),
      Some((Some("1.5".to_string()), Some("2.25".to_string())))
    );

    let value = json!({});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(fields.position(&["coordinates"], &["X"], &["Y"]), None);
  }

  #[test]
  fn test_number_is_lenient() {
    let value = json!({"a": 740.5, "b": "12", "c": 3, "d": [1]});
    let fields = RawFields::new("Test", &value).unwrap();
    assert_eq!(fields.number(&["a"]), Some(740.5));
    assert_eq!(fields.number(&["b"]), Some(12.0));
    assert_eq!(fields.number(&["c"]), Some(3.0));
    assert_eq!(fields.number(&["d"]), None);
  }
}
