use livelink_config::{ConfigError, TomlConfigBackend};
use livelink_core::domain::BandId;
use livelink_core::services::ShareOptions;
use livelink_core::services::share::DEFAULT_PUBLIC_BASE_URL;
use livelink_core::services::slug::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SLUG_LEN};
use livelink_storage::StorageConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Band used when the config file does not name one.
pub const DEFAULT_BAND_ID: Uuid = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
  pub id: BandId,
  pub name: String,
}

impl Default for BandConfig {
  fn default() -> Self {
    BandConfig { id: BandId::from_uuid(DEFAULT_BAND_ID), name: "My Band".to_string() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
  pub slug_length: usize,
  pub max_attempts: usize,
  pub public_base_url: String,
}

impl Default for ShareConfig {
  fn default() -> Self {
    ShareConfig {
      slug_length: DEFAULT_SLUG_LEN,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
      public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
    }
  }
}

impl ShareConfig {
  pub fn share_options(&self) -> ShareOptions {
    ShareOptions { public_base_url: self.public_base_url.clone() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// `EnvFilter` directives; `RUST_LOG` wins when set.
  pub filter: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    LogConfig { filter: "info".to_string() }
  }
}

/// Every section of `livelink.toml`. Missing sections are written back with
/// their defaults on load.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
  pub storage: StorageConfig,
  pub band: BandConfig,
  pub share: ShareConfig,
  pub log: LogConfig,
}

impl AppConfig {
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    Ok(AppConfig {
      storage: StorageConfig::load(backend)?,
      band: backend.load_or_init_section("band")?,
      share: backend.load_or_init_section("share")?,
      log: backend.load_or_init_section("log")?,
    })
  }
}
