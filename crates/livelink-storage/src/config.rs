use livelink_config::{ConfigError, LiveLinkPaths, TomlConfigBackend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SECTION: &str = "storage";

/// Valor de `journal_mode` que deja el de SQLite sin tocar.
pub const KEEP_JOURNAL_MODE: &str = "default";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
  /// Relativa a `data_dir` salvo que sea absoluta.
  pub db_path: PathBuf,
  /// `PRAGMA journal_mode` para bases en fichero; `"default"` no lo aplica.
  pub journal_mode: String,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { db_path: PathBuf::from("livelink.db"), journal_mode: "WAL".to_string() }
  }
}

impl StorageConfig {
  pub fn load(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    backend.load_or_init_section(SECTION)
  }

  pub fn save(&self, backend: &TomlConfigBackend) -> Result<(), ConfigError> {
    use livelink_config::ConfigBackend;
    backend.save_section(SECTION, self)
  }

  pub fn journal_pragma(&self) -> Option<&str> {
    let mode = self.journal_mode.trim();
    if mode.is_empty() || mode.eq_ignore_ascii_case(KEEP_JOURNAL_MODE) {
      return None;
    }
    Some(mode)
  }

  pub fn database_url(&self, paths: &LiveLinkPaths) -> String {
    paths.data_file(&self.db_path).to_string_lossy().into_owned()
  }
}
