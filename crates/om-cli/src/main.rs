/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
use commands::{geocode::ReverseGeocodeCommand, route::RouteCommand, search::SearchCommand};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "onemap")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  overrides: config::Overrides,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Search addresses, buildings and postal codes
  Search(SearchCommand),
  /// Route between two points
  Route(RouteCommand),
  /// Find buildings around a coordinate
  ReverseGeocode(ReverseGeocodeCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).with_writer(std::io::stderr).init();

  // Load configuration
  let config = config::load(&cli.overrides)?;

  // Execute command
  match cli.command {
    Commands::Search(cmd) => commands::search::execute(cmd, config).await?,
    Commands::Route(cmd) => commands::route::execute(cmd, config).await?,
    Commands::ReverseGeocode(cmd) => commands::geocode::execute(cmd, config).await?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;
  use om_client::RouteType;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_route() {
    let cli = Cli::try_parse_from([
      "onemap",
      "route",
      "1.320981,103.844150",
      "1.326762,103.8559",
      "--route-type",
      "PT",
      "--date",
      "03-01-2024",
      "--mode",
      "TRANSIT",
    ])
    .unwrap();

    match cli.command {
      Commands::Route(cmd) => {
        assert_eq!(cmd.route_type, RouteType::Pt);
        assert_eq!(cmd.mode.as_deref(), Some("TRANSIT"));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn test_parse_reverse_geocode_defaults() {
    let cli = Cli::try_parse_from(["onemap", "-v", "reverse-geocode", "wgs84", "1.3", "103.8"]).unwrap();
    assert!(cli.verbose);
    match cli.command {
      Commands::ReverseGeocode(cmd) => {
        assert_eq!(cmd.buffer, 10);
        assert_eq!(cmd.address_type, "all");
        assert!(!cmd.other_features);
      }
      other => panic!("unexpected command {other:?}"),
    }
  }

  #[test]
  fn test_rejects_unknown_route_type() {
    assert!(Cli::try_parse_from(["onemap", "route", "a", "b", "--route-type", "teleport"]).is_err());
  }
}
