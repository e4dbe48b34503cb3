//! Runtime server configuration.
//!
//! Layered from built-in defaults, an optional TOML file, then `TRIBUTE_*`
//! environment variables (e.g. `TRIBUTE_PORT=9000`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use tribute_core::projector::DEFAULT_LOOKAHEAD_DAYS;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Default window for `GET /api/events`.
  pub lookahead_days: u32,
}

impl ServerConfig {
  /// Load from `path` (missing file is fine) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080_i64)?
      .set_default("store_path", "tribute.db")?
      .set_default("lookahead_days", i64::from(DEFAULT_LOOKAHEAD_DAYS))?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("TRIBUTE"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
