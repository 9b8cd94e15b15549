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

use super::print_result;
use anyhow::Result;
use clap::Args;
use om_client::{OneMapClient, RouteType, TransitOptions};
use om_core::Config;
use om_models::ResponseModel;
use serde_json::json;

#[derive(Args, Debug)]
pub struct RouteCommand {
  /// Start point as `lat,long`
  pub start: String,

  /// End point as `lat,long`
  pub end: String,

  /// walk, drive, cycle or pt
  #[arg(short, long, default_value = "walk")]
  pub route_type: RouteType,

  /// Travel date for pt, `MM-DD-YYYY`
  #[arg(long)]
  pub date: Option<String>,

  /// Departure time for pt, `HH:MM:SS`
  #[arg(long)]
  pub time: Option<String>,

  /// Transit mode for pt, e.g. `TRANSIT`, `BUS`, `RAIL`
  #[arg(long)]
  pub mode: Option<String>,

  /// Maximum walking distance for pt, in metres
  #[arg(long)]
  pub max_walk_distance: Option<u32>,

  /// Number of itineraries for pt
  #[arg(long)]
  pub num_itineraries: Option<u32>,

  /// Print the decoded route geometry instead of the raw response
  #[arg(long)]
  pub points: bool,
}

impl RouteCommand {
  fn transit_options(&self) -> Option<TransitOptions> {
    let mut options = TransitOptions::new();
    if let Some(date) = &self.date {
      options = options.date(date.as_str());
    }
    if let Some(time) = &self.time {
      options = options.time(time.as_str());
    }
    if let Some(mode) = &self.mode {
      options = options.mode(mode.as_str());
    }
    if let Some(metres) = self.max_walk_distance {
      options = options.max_walk_distance(metres);
    }
    if let Some(count) = self.num_itineraries {
      options = options.num_itineraries(count);
    }
    (!options.is_empty()).then_some(options)
  }
}

pub async fn execute(cmd: RouteCommand, config: Config) -> Result<()> {
  let client = OneMapClient::new(config).await?;
  let result = client.route(&cmd.start, &cmd.end, cmd.route_type, cmd.transit_options()).await?;

  let Some(route) = result else {
    return print_result(None);
  };

  if !cmd.points {
    return print_result(Some(route.to_dict()));
  }

  let points = match route.as_transit() {
    Some(plan) => json!(plan.itinerary_lat_longs(0)?),
    None => json!(route.lat_longs()?),
  };
  print_result(Some(points))
}
