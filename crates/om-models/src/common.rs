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

//! Common types shared by the OneMap response models

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::polyline::PolylineError;

/// A coordinate pair exactly as OneMap sends it: two numeric strings,
/// either of which may be missing. Used for both SVY21 X/Y and WGS84
/// latitude/longitude.
pub type GeoPosition = (Option<String>, Option<String>);

/// A decoded (latitude, longitude) point
pub type LatLng = (f64, f64);

/// Parses both halves of a position as `f64`
pub fn position_as_f64(position: &GeoPosition) -> Option<(f64, f64)> {
  let first = position.0.as_deref()?.trim().parse().ok()?;
  let second = position.1.as_deref()?.trim().parse().ok()?;
  Some((first, second))
}

/// Errors raised while mapping a raw payload into a model
#[derive(Error, Debug)]
pub enum ModelError {
  #[error("{model}: expected a JSON object, got {found}")]
  NotAnObject { model: &'static str, found: &'static str },

  #[error("{model}: missing required field `{field}`")]
  MissingField { model: &'static str, field: &'static str },

  #[error("{model}: invalid field `{field}`: {reason}")]
  InvalidField { model: &'static str, field: &'static str, reason: String },

  #[error(transparent)]
  Polyline(#[from] PolylineError),
}

/// A record built from one raw OneMap JSON object.
pub trait ResponseModel: Serialize + Sized {
  /// Model name used in error messages
  const NAME: &'static str;

  /// Maps a raw payload into the model. Unknown keys are ignored; absent
  /// optional fields stay `None`.
  fn from_json(value: &Value) -> Result<Self, ModelError>;

  /// Plain JSON view of the populated fields, keyed by the model's
  /// `snake_case` field names. Nested records and lists are converted too.
  fn to_dict(&self) -> Value {
    serde_json::to_value(self).unwrap_or(Value::Null)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_position_as_f64() {
    let pos: GeoPosition = (Some("1.3".to_string()), Some(" 103.8".to_string()));
    assert_eq!(position_as_f64(&pos), Some((1.3, 103.8)));

    let pos: GeoPosition = (Some("1.3".to_string()), None);
    assert_eq!(position_as_f64(&pos), None);

    let pos: GeoPosition = (Some("north".to_string()), Some("1".to_string()));
    assert_eq!(position_as_f64(&pos), None);
  }
}
