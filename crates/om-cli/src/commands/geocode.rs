use super::print_result;
use anyhow::Result;
use clap::Args;
use om_client::{Location, OneMapClient};
use om_core::Config;
use om_models::ResponseModel;

#[derive(Args, Debug)]
pub struct ReverseGeocodeCommand {
  /// Coordinate system: svy21 (X Y) or wgs84 (lat long)
  pub reverse_type: String,

  /// X or latitude
  pub first: String,

  /// Y or longitude
  pub second: String,

  /// Search radius in metres
  #[arg(short, long, default_value_t = om_client::query::DEFAULT_BUFFER)]
  pub buffer: u32,

  /// all or hdb
  #[arg(short, long, default_value = om_client::query::DEFAULT_ADDRESS_TYPE)]
  pub address_type: String,

  /// Include non-building features such as parks
  #[arg(long)]
  pub other_features: bool,
}

pub async fn execute(cmd: ReverseGeocodeCommand, config: Config) -> Result<()> {
  let client = OneMapClient::new(config).await?;
  let location = Location::new(&cmd.first, &cmd.second);
  let result = client
    .reverse_geocode(&cmd.reverse_type, location, cmd.buffer, &cmd.address_type, cmd.other_features)
    .await?;

  print_result(result.map(|info| info.to_dict()))
}
