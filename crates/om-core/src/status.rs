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

//! HTTP status code helpers

pub const HTTP_200_OK: u16 = 200;
pub const HTTP_301_MOVED_PERMANENTLY: u16 = 301;
pub const HTTP_400_BAD_REQUEST: u16 = 400;
pub const HTTP_401_UNAUTHORIZED: u16 = 401;
pub const HTTP_404_NOT_FOUND: u16 = 404;
pub const HTTP_500_INTERNAL_SERVER_ERROR: u16 = 500;
pub const HTTP_503_SERVICE_UNAVAILABLE: u16 = 503;

pub fn is_informational(code: u16) -> bool {
  (100..=199).contains(&code)
}

pub fn is_success(code: u16) -> bool {
  (200..=299).contains(&code)
}

pub fn is_redirect(code: u16) -> bool {
  (300..=399).contains(&code)
}

pub fn is_client_error(code: u16) -> bool {
  (400..=499).contains(&code)
}

pub fn is_server_error(code: u16) -> bool {
  (500..=599).contains(&code)
}

/// How the client treats a response status.
///
/// Only 200 counts as success. Anything that is neither 200, 4xx nor 5xx
/// is `Other` and is passed through as "no result".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
  Ok,
  ClientError,
  ServerError,
  Other,
}

impl StatusClass {
  pub fn from_code(code: u16) -> Self {
    if code == HTTP_200_OK {
      StatusClass::Ok
    } else if is_client_error(code) {
      StatusClass::ClientError
    } else if is_server_error(code) {
      StatusClass::ServerError
    } else {
      StatusClass::Other
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_informational() {
    assert!(is_informational(100));
    assert!(is_informational(199));
    assert!(!is_informational(99));
    assert!(!is_informational(200));
  }

  #[test]
  fn test_is_success() {
    assert!(is_success(200));
    assert!(is_success(299));
    assert!(!is_success(199));
    assert!(!is_success(300));
  }

  #[test]
  fn test_is_redirect() {
    assert!(is_redirect(300));
    assert!(is_redirect(399));
    assert!(!is_redirect(299));
    assert!(!is_redirect(400));
  }

  #[test]
  fn test_is_client_error() {
    assert!(is_client_error(400));
    assert!(is_client_error(499));
    assert!(!is_client_error(399));
    assert!(!is_client_error(500));
  }

  #[test]
  fn test_is_server_error() {
    assert!(is_server_error(500));
    assert!(is_server_error(599));
    assert!(!is_server_error(499));
    assert!(!is_server_error(600));
  }

  #[test]
  fn test_status_class() {
    assert_eq!(StatusClass::from_code(HTTP_200_OK), StatusClass::Ok);
    assert_eq!(StatusClass::from_code(204), StatusClass::Other);
    assert_eq!(StatusClass::from_code(HTTP_301_MOVED_PERMANENTLY), StatusClass::Other);
    assert_eq!(StatusClass::from_code(HTTP_404_NOT_FOUND), StatusClass::ClientError);
    assert_eq!(StatusClass::from_code(HTTP_503_SERVICE_UNAVAILABLE), StatusClass::ServerError);
    assert_eq!(StatusClass::from_code(600), StatusClass::Other);
  }
}
