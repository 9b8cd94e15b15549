pub mod geocode;
pub mod route;
pub mod search;

use anyhow::Result;
use serde_json::Value;

/// Writes one result to stdout as pretty JSON, or a note on stderr when there is none
pub fn print_result(result: Option<Value>) -> Result<()> {
  match result {
    Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
    None => eprintln!("No result: the server answered with an unhandled status"),
  }
  Ok(())
}
