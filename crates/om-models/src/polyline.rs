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

//! Encoded polyline codec (Google's polyline algorithm).
//!
//! OneMap encodes route geometry at precision 5.

use crate::common::LatLng;
use thiserror::Error;

/// Precision used by OneMap route geometry
pub const DEFAULT_PRECISION: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
  #[error("invalid polyline character {character:?} at byte {position}")]
  InvalidCharacter { character: char, position: usize },

  #[error("polyline ends in the middle of a value at byte {position}")]
  Truncated { position: usize },

  #[error("polyline value starting before byte {position} is too long")]
  Overflow { position: usize },
}

/// Decodes an encoded polyline into (latitude, longitude) pairs
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<LatLng>, PolylineError> {
  let factor = 10_f64.powi(precision as i32);
  let bytes = encoded.as_bytes();
  let mut points = Vec::new();
  let mut index = 0;
  let (mut lat, mut lng) = (0_i64, 0_i64);

  while index < bytes.len() {
    lat = accumulate(lat, bytes, &mut index)?;
    lng = accumulate(lng, bytes, &mut index)?;
    points.push((lat as f64 / factor, lng as f64 / factor));
  }

  Ok(points)
}

/// [`decode`] at [`DEFAULT_PRECISION`]
pub fn decode_default(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
  decode(encoded, DEFAULT_PRECISION)
}

/// Encodes (latitude, longitude) pairs
pub fn encode(points: &[LatLng], precision: u32) -> String {
  let factor = 10_f64.powi(precision as i32);
  let mut out = String::new();
  let (mut prev_lat, mut prev_lng) = (0_i64, 0_i64);

  for &(lat, lng) in points {
    let lat = (lat * factor).round() as i64;
    let lng = (lng * factor).round() as i64;
    push_value(&mut out, lat - prev_lat);
    push_value(&mut out, lng - prev_lng);
    prev_lat = lat;
    prev_lng = lng;
  }

  out
}

/// Adds the next delta to a running coordinate, rejecting sums past `i64`
fn accumulate(current: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
  let start = *index;
  current.checked_add(next_value(bytes, index)?).ok_or(PolylineError::Overflow { position: start })
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
  let start = *index;
  let mut result = 0_i64;
  let mut shift = 0;

  loop {
    let Some(&byte) = bytes.get(*index) else {
      return Err(PolylineError::Truncated { position: *index });
    };
    if !(63..=126).contains(&byte) {
      return Err(PolylineError::InvalidCharacter { character: byte as char, position: *index });
    }
    if shift > 60 {
      return Err(PolylineError::Overflow { position: start });
    }
    *index += 1;

    let chunk = i64::from(byte - 63);
    result |= (chunk & 0x1f) << shift;
    shift += 5;
    if chunk < 0x20 {
      break;
    }
  }

  Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

fn push_value(out: &mut String, value: i64) {
  let mut v = if value < 0 { !(value << 1) } else { value << 1 };
  while v >= 0x20 {
    out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
    v >>= 5;
  }
  out.push(char::from(v as u8 + 63));
}
