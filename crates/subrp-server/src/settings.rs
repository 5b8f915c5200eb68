//! Server configuration.
//!
//! Read from an optional TOML file, then overridden by `SUBRP_`-prefixed
//! environment variables (`__` separates nested keys, e.g.
//! `SUBRP_STORE__BACKEND=sqlite`).

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default)]
  pub store:        StoreConfig,
  /// When set, a Prometheus exporter listens on this port.
  #[serde(default)]
  pub metrics_port: Option<u16>,
}

/// Which document store backs the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
  /// Documents live only as long as the process.
  #[default]
  Memory,
  /// A SQLite file; `~/` is expanded.
  Sqlite { path: PathBuf },
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8443 }

impl ServerConfig {
  /// Layer the file at `path` (if it exists) under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::load_with_env(path, None)
  }

  /// Like [`ServerConfig::load`], reading variables from `env` instead of
  /// the process environment when it is `Some`.
  fn load_with_env(
    path: &Path,
    env: Option<config::Map<String, String>>,
  ) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("SUBRP")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true)
          .source(env),
      )
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
