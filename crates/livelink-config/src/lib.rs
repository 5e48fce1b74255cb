mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, CONFIG_FILE_NAME, ConfigError, LiveLinkPaths};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<LiveLinkPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Paths del proceso (portable o de sistema), resueltos una sola vez.
pub fn paths() -> Result<&'static LiveLinkPaths, ConfigError> {
  PATHS.get_or_try_init(LiveLinkPaths::detect)
}

/// Backend de configuración compartido sobre [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| Ok(TomlConfigBackend::new(paths()?.clone())))
}
