use anyhow::{Context, Result};
use clap::Args;
use om_core::Config;

/// Connection settings that can be given on the command line instead of the environment
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
  /// Account email (defaults to ONEMAP_EMAIL)
  #[arg(long, global = true)]
  pub email: Option<String>,

  /// Account password (defaults to ONEMAP_PASSWORD)
  #[arg(long, global = true)]
  pub password: Option<String>,

  /// Alternative server, e.g. a local proxy
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Per-request timeout in seconds
  #[arg(long, global = true)]
  pub timeout: Option<u64>,
}

/// Environment configuration with command-line overrides applied on top
pub fn load(overrides: &Overrides) -> Result<Config> {
  let config = Config::from_env().context("Failed to load OneMap configuration from environment")?;
  apply(config, overrides)
}

fn apply(mut config: Config, overrides: &Overrides) -> Result<Config> {
  if let Some(email) = &overrides.email {
    config.email = Some(email.clone());
  }
  if let Some(password) = &overrides.password {
    config.password = Some(password.clone());
  }
  if let Some(base_url) = &overrides.base_url {
    config = config.with_base_url(base_url).with_context(|| format!("Invalid base URL {base_url}"))?;
  }
  if let Some(timeout) = overrides.timeout {
    config = config.with_timeout_secs(timeout);
  }
  Ok(config)
}
