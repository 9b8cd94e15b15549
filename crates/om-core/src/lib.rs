pub mod api;
pub mod config;
pub mod error;
pub mod status;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::{Endpoint, ONEMAP_BASE_URL};
pub use config::Config;
pub use error::{Error, Result};
pub use status::StatusClass;

/// Tokens expiring within this many seconds are refreshed before a protected call.
pub const DEFAULT_REFRESH_MARGIN_SECS: i64 = 120;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
