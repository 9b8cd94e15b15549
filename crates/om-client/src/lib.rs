//! # om-client
//!
//! An async client for the OneMap SG geospatial API.
//!
//! ## Features
//!
//! - **Token management**: authenticates with email and password, refreshes
//!   the bearer token two minutes before it expires
//! - **Async/Await**: Built on tokio and reqwest
//! - **Type Safe**: Responses are mapped into om-models result types
//! - **Configurable**: Environment-based configuration via om-core
//! - **Pluggable transport**: anything implementing [`HttpTransport`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use om_client::{OneMapClient, RouteType};
//! use om_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = OneMapClient::new(config).await?;
//!
//!     if let Some(found) = client.search_with_defaults("revenue house").await? {
//!         for item in &found.results {
//!             println!("{:?} {:?}", item.search_value, item.lat_long);
//!         }
//!     }
//!
//!     let route = client
//!         .route("1.320981,103.844150", "1.326762,103.8559", RouteType::Walk, None)
//!         .await?;
//!     if let Some(route) = route {
//!         println!("{} points", route.lat_longs()?.map_or(0, |p| p.len()));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Status handling
//!
//! 200 responses are parsed, 4xx become [`Error::BadRequest`] (or
//! [`Error::Authentication`] on the token endpoint), 5xx become
//! [`Error::Server`]. Any other status yields `Ok(None)`.

#![warn(clippy::all)]

pub mod client;
pub mod operation;
pub mod query;
pub mod session;
pub mod transport;

// Re-export the main client and common types
pub use client::OneMapClient;
pub use om_core::{Config, Endpoint, Error, Result, StatusClass};
pub use om_models::*;
pub use operation::{ApiResult, Operation, ReverseType};
pub use query::{Location, RouteType, TransitOptions};
pub use transport::{ApiResponse, HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_anonymous_client_creation() {
    let client = OneMapClient::anonymous().unwrap();
    assert_eq!(client.config().base_url, om_core::ONEMAP_BASE_URL);
    assert!(!client.config().has_credentials());
  }
}
