//! Implementación SQLite de todos los puertos de gateway.
//!
//! Las consultas corren de forma síncrona bajo el mutex de la conexión: la base
//! es local y cada llamada son pocas sentencias. Los errores de almacenamiento
//! pasan a ser el `error` de la respuesta, como esperan los puertos.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use tracing::{info, warn};

use livelink_core::domain::{
  Band, BandId, Live, LiveFormData, LiveId, LivePatch, SetlistItem, SetlistItemId, SharedLive, Song, SongFormData,
  SongId, SongPatch,
};
use livelink_core::ports::{ApiResponse, LiveGateway, SetlistGateway, ShareGateway, SongGateway};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::sqlite::{IN_MEMORY, initialize_database};
use crate::{mutations, queries};

pub struct SqliteGateway {
  conn: Mutex<SqliteConnection>,
}

impl SqliteGateway {
  pub fn open(database_url: &str, journal_mode: Option<&str>) -> Result<Self, StorageError> {
    let conn = initialize_database(database_url, journal_mode)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  pub fn from_config(config: &StorageConfig, paths: &livelink_config::LiveLinkPaths) -> Result<Self, StorageError> {
    Self::open(&config.database_url(paths), config.journal_pragma())
  }

  pub fn open_in_memory() -> Result<Self, StorageError> {
    Self::open(IN_MEMORY, None)
  }

  /// Siembra la banda de la que cuelgan todas las demás filas.
  pub fn ensure_band(&self, id: BandId, name: &str) -> Result<Band, StorageError> {
    let band = mutations::ensure_band(&mut *self.conn()?, id, name)?;
    info!(band = %band.id, name = %band.name, "band ready");
    Ok(band)
  }

  fn conn(&self) -> Result<MutexGuard<'_, SqliteConnection>, StorageError> {
    self.conn.lock().map_err(|_| StorageError::Poisoned)
  }

  fn run<T>(&self, op: &'static str, f: impl FnOnce(&mut SqliteConnection) -> Result<T, StorageError>) -> ApiResponse<T> {
    let result = self.conn().and_then(|mut conn| f(&mut conn));
    match result {
      Ok(data) => ApiResponse::ok(data),
      Err(err) => {
        warn!(op, error = %err, "storage call failed");
        ApiResponse::err(err.to_string())
      }
    }
  }
}

#[async_trait]
impl SongGateway for SqliteGateway {
  async fn list_songs(&self, band_id: BandId) -> ApiResponse<Vec<Song>> {
    self.run("list_songs", |conn| queries::songs_by_band(conn, band_id))
  }

  async fn search_songs(&self, band_id: BandId, query: &str) -> ApiResponse<Vec<Song>> {
    self.run("search_songs", |conn| queries::search_songs(conn, band_id, query))
  }

  async fn create_song(&self, band_id: BandId, form: &SongFormData) -> ApiResponse<Song> {
    self.run("create_song", |conn| mutations::insert_song(conn, band_id, form))
  }

  async fn update_song(&self, id: SongId, patch: &SongPatch) -> ApiResponse<Song> {
    self.run("update_song", |conn| mutations::update_song(conn, id, patch))
  }

  async fn delete_song(&self, id: SongId) -> ApiResponse<()> {
    self.run("delete_song", |conn| mutations::delete_song(conn, id).map(drop))
  }
}

#[async_trait]
impl LiveGateway for SqliteGateway {
  async fn list_lives(&self, band_id: BandId) -> ApiResponse<Vec<Live>> {
    self.run("list_lives", |conn| queries::lives_by_band(conn, band_id))
  }

  async fn create_live(&self, band_id: BandId, form: &LiveFormData) -> ApiResponse<Live> {
    self.run("create_live", |conn| mutations::insert_live(conn, band_id, form))
  }

  async fn update_live(&self, id: LiveId, patch: &LivePatch) -> ApiResponse<Live> {
    self.run("update_live", |conn| mutations::update_live(conn, id, patch))
  }

  async fn delete_live(&self, id: LiveId) -> ApiResponse<()> {
    self.run("delete_live", |conn| mutations::delete_live(conn, id).map(drop))
  }
}

#[async_trait]
impl SetlistGateway for SqliteGateway {
  async fn list_setlist(&self, live_id: LiveId) -> ApiResponse<Vec<SetlistItem>> {
    self.run("list_setlist", |conn| queries::setlist_by_live(conn, live_id))
  }

  async fn add_setlist_song(&self, live_id: LiveId, song_id: SongId, order_index: i32) -> ApiResponse<SetlistItem> {
    self.run("add_setlist_song", |conn| mutations::insert_setlist_item(conn, live_id, song_id, order_index))
  }

  async fn update_setlist_order(&self, id: SetlistItemId, order_index: i32) -> ApiResponse<SetlistItem> {
    self.run("update_setlist_order", |conn| mutations::update_setlist_order(conn, id, order_index))
  }

  async fn remove_setlist_song(&self, id: SetlistItemId) -> ApiResponse<()> {
    self.run("remove_setlist_song", |conn| mutations::delete_setlist_item(conn, id).map(drop))
  }

  async fn clear_setlist(&self, live_id: LiveId) -> ApiResponse<()> {
    self.run("clear_setlist", |conn| mutations::clear_setlist(conn, live_id).map(drop))
  }
}

#[async_trait]
impl ShareGateway for SqliteGateway {
  async fn find_shared_live(&self, share_slug: &str) -> ApiResponse<Option<SharedLive>> {
    self.run("find_shared_live", |conn| queries::shared_live(conn, share_slug))
  }

  async fn share_slug_exists(&self, share_slug: &str) -> ApiResponse<bool> {
    self.run("share_slug_exists", |conn| queries::share_slug_exists(conn, share_slug))
  }
}
