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
use om_client::OneMapClient;
use om_core::Config;
use om_models::ResponseModel;
use tracing::info;

#[derive(Args, Debug)]
pub struct SearchCommand {
  /// Address, building name or postal code
  pub value: String,

  /// Result page, starting at 1
  #[arg(short, long)]
  pub page: Option<u32>,

  /// Leave out coordinates
  #[arg(long)]
  pub no_geometry: bool,

  /// Leave out block, road and postal code
  #[arg(long)]
  pub no_details: bool,
}

pub async fn execute(cmd: SearchCommand, config: Config) -> Result<()> {
  let client = OneMapClient::new(config).await?;
  let result = client.search(&cmd.value, !cmd.no_geometry, !cmd.no_details, cmd.page).await?;

  if let Some(found) = &result {
    info!("Page {} of {}, {} results", found.page_num, found.total_num_pages, found.results.len());
  }
  print_result(result.map(|r| r.to_dict()))
}
