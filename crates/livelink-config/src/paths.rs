use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BASE_DIR_ENV: &str = "LIVELINK_BASE_DIR";
pub const CONFIG_FILE_NAME: &str = "livelink.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveLinkPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl LiveLinkPaths {
  /// Layout portable: `config/`, `data/` y `cache/` bajo un mismo directorio.
  pub fn at(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let base_dir = base.into();
    let paths = Self {
      config_dir: base_dir.join("config"),
      data_dir: base_dir.join("data"),
      cache_dir: base_dir.join("cache"),
      base_dir,
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  /// `$LIVELINK_BASE_DIR` si está definido; si no, los directorios del sistema.
  pub fn detect() -> Result<Self, ConfigError> {
    if let Ok(env_base) = std::env::var(BASE_DIR_ENV) {
      return Self::at(env_base);
    }

    let proj_dirs = ProjectDirs::from("app", "livelink", "livelink").ok_or(ConfigError::Directories)?;
    let paths = Self {
      base_dir: proj_dirs.config_dir().to_path_buf(),
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: proj_dirs.cache_dir().to_path_buf(),
    };
    paths.create_dirs()?;
    Ok(paths)
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Ruta relativa resuelta contra `data_dir`; las absolutas se respetan.
  pub fn data_file(&self, name: impl AsRef<Path>) -> PathBuf {
    self.data_dir.join(name)
  }

  fn create_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    std::fs::create_dir_all(&self.cache_dir)?;
    Ok(())
  }
}
