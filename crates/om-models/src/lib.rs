//! # om-models
//!
//! Data models for OneMap SG API responses.
//!
//! OneMap payloads are loosely typed: keys arrive in `UPPERCASE`,
//! `snake_case` or `camelCase` depending on the endpoint, numbers are often
//! strings, and some keys are misspelled upstream (`LONGTITUDE`). Each model
//! here declares its fields explicitly and maps raw keys onto them by hand.
//!
//! ## Features
//!
//! - **Search**: `SearchResult` / `SearchResultItem`
//! - **Reverse geocode**: `GeocodeInfo` / `GeocodeInfoItem`
//! - **Routing**: `RouteResult`, either a `VehicularRoute` or a `TransitPlan`
//! - **Polyline**: decoding of route geometry into latitude/longitude points
//!
//! ## Usage
//!
//! ```ignore
//! use om_models::{ResponseModel, SearchResult};
//!
//! let result = SearchResult::from_json(&serde_json::from_str(&body)?)?;
//! for item in &result.results {
//!     println!("{:?} {:?}", item.address, item.lat_long_f64());
//! }
//! println!("{}", result.to_dict());
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod geocode;
pub mod polyline;
pub mod raw;
pub mod route;
pub mod search;

// Re-export common types for convenience
pub use common::*;

// Re-export all model types
pub use geocode::*;
pub use route::*;
pub use search::*;
