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

//! Address Lookup Example
//!
//! Searches for a postal code, finds the buildings around the first match
//! and walks from there to a second address.
//!
//! Needs ONEMAP_EMAIL and ONEMAP_PASSWORD for the routing and reverse
//! geocoding calls; search works without them.

use om_client::{OneMapClient, RouteType};
use om_core::{Config, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Initialize logging
  tracing_subscriber::fmt::init();

  // Load configuration from environment
  let config = Config::from_env().map_err(|e| {
    eprintln!("Failed to load configuration. Check ONEMAP_* variables.");
    eprintln!("Error: {}", e);
    e
  })?;

  let client = match OneMapClient::new(config).await {
    Ok(client) => client,
    Err(Error::Authentication(msg)) => {
      eprintln!("Authentication failed: {}", msg);
      return Ok(());
    }
    Err(e) => return Err(e.into()),
  };

  let Some(origin) = lookup(&client, "307987").await? else {
    println!("No match for the origin postal code");
    return Ok(());
  };
  let Some(destination) = lookup(&client, "329985").await? else {
    println!("No match for the destination postal code");
    return Ok(());
  };

  if !client.is_authenticated().await {
    println!("Not authenticated, skipping reverse geocode and routing");
    return Ok(());
  }

  let (lat, lng) = origin;
  if let Some(info) = client.reverse_geocode_with_defaults("wgs84", (lat, lng)).await? {
    println!("\nBuildings within 10m of the origin:");
    for building in info.iter() {
      println!(
        "  {} {} ({})",
        building.block.as_deref().unwrap_or("-"),
        building.building_name.as_deref().unwrap_or("unnamed"),
        building.postal_code.as_deref().unwrap_or("no postal code")
      );
    }
  }

  let start = format!("{},{}", origin.0, origin.1);
  let end = format!("{},{}", destination.0, destination.1);
  if let Some(route) = client.route(&start, &end, RouteType::Walk, None).await? {
    if let Some(summary) = route.as_vehicular().and_then(|r| r.summary()) {
      println!(
        "\nWalk: {:.0} m, about {:.0} min",
        summary.total_distance.unwrap_or_default(),
        summary.total_time.unwrap_or_default() / 60.0
      );
    }
    let points = route.lat_longs()?.unwrap_or_default();
    println!("Route geometry has {} points", points.len());
  }

  Ok(())
}

/// First search match for `postal_code` as WGS84 coordinates
async fn lookup(client: &OneMapClient, postal_code: &str) -> Result<Option<(f64, f64)>, Error> {
  let Some(result) = client.search_with_defaults(postal_code).await? else {
    return Ok(None);
  };
  let Some(first) = result.results.first() else {
    return Ok(None);
  };
  println!("{} -> {}", postal_code, first.address.as_deref().unwrap_or("?"));
  Ok(first.lat_long_f64())
}
