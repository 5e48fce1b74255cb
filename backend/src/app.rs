use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use livelink_config::LiveLinkPaths;
use livelink_core::domain::Band;
use livelink_core::services::{ShareService, SlugGenerator};
use livelink_core::stores::{LivesStore, SetlistStore, SongsStore};
use livelink_storage::SqliteGateway;

use crate::config::AppConfig;

/// Everything a command needs, wired over one SQLite gateway.
pub struct App {
  pub config: AppConfig,
  pub paths: LiveLinkPaths,
  pub band: Band,
  pub songs: SongsStore<SqliteGateway>,
  pub lives: LivesStore<SqliteGateway>,
  pub setlist: SetlistStore<SqliteGateway>,
  pub share: ShareService<SqliteGateway>,
  pub slugs: SlugGenerator<SqliteGateway>,
  pub today: NaiveDate,
}

impl App {
  pub fn open(mut config: AppConfig, paths: &LiveLinkPaths, database: Option<PathBuf>) -> anyhow::Result<Self> {
    if let Some(db_path) = database {
      config.storage.db_path = db_path;
    }
    debug!(db = %config.storage.database_url(paths), "opening storage");

    let gateway = Arc::new(SqliteGateway::from_config(&config.storage, paths)?);
    let band = gateway.ensure_band(config.band.id, &config.band.name)?;

    Ok(App {
      songs: SongsStore::new(Arc::clone(&gateway), band.id),
      lives: LivesStore::new(Arc::clone(&gateway), band.id),
      setlist: SetlistStore::new(Arc::clone(&gateway)),
      share: ShareService::new(Arc::clone(&gateway), config.share.share_options()),
      slugs: SlugGenerator::new(gateway, config.share.max_attempts),
      today: Local::now().date_naive(),
      band,
      config,
      paths: paths.clone(),
    })
  }
}
