use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration, read from `config.toml` and `AIRVINYL_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// SQLite database file. A leading `~/` is expanded.
  pub store_path:     PathBuf,
  /// Load the demo catalog into an empty store on startup.
  pub seed_demo_data: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           "127.0.0.1".to_string(),
      port:           5280,
      store_path:     PathBuf::from("airvinyl.db"),
      seed_demo_data: false,
    }
  }
}
