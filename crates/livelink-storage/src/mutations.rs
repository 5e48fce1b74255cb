//! Escrituras. Las que devuelven fila usan `RETURNING` (SQLite >= 3.35).

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use livelink_core::domain::{
  Band, BandId, Live, LiveFormData, LiveId, LivePatch, SetlistItem, SetlistItemId, Song, SongFormData, SongId,
  SongPatch,
};

use crate::error::StorageError;
use crate::models::{self, BandRow, LiveChangeset, LiveRow, SetlistItemRow, SongChangeset, SongRow};
use crate::queries;
use crate::schema::{bands, lives, setlist_items, songs};

/// Crea la banda si todavía no existe; nunca pisa una existente.
pub fn ensure_band(conn: &mut SqliteConnection, id: BandId, name: &str) -> Result<Band, StorageError> {
  let inserted = diesel::insert_into(bands::table).values(BandRow::new(id, name)).on_conflict_do_nothing().execute(conn)?;
  if inserted > 0 {
    debug!(band = %id, name, "band created");
  }

  queries::find_band(conn, id)?.ok_or(StorageError::Query(diesel::result::Error::NotFound))
}

pub fn insert_song(conn: &mut SqliteConnection, band_id: BandId, form: &SongFormData) -> Result<Song, StorageError> {
  diesel::insert_into(songs::table)
    .values(SongRow::new(band_id, form))
    .returning(SongRow::as_returning())
    .get_result::<SongRow>(conn)?
    .try_into()
}

pub fn update_song(conn: &mut SqliteConnection, id: SongId, patch: &SongPatch) -> Result<Song, StorageError> {
  diesel::update(songs::table.find(id.to_string()))
    .set(SongChangeset::from(patch))
    .returning(SongRow::as_returning())
    .get_result::<SongRow>(conn)?
    .try_into()
}

/// Sus items de setlist caen por cascada.
pub fn delete_song(conn: &mut SqliteConnection, id: SongId) -> Result<usize, StorageError> {
  Ok(diesel::delete(songs::table.find(id.to_string())).execute(conn)?)
}

pub fn insert_live(conn: &mut SqliteConnection, band_id: BandId, form: &LiveFormData) -> Result<Live, StorageError> {
  diesel::insert_into(lives::table)
    .values(LiveRow::new(band_id, form))
    .returning(LiveRow::as_returning())
    .get_result::<LiveRow>(conn)?
    .try_into()
}

pub fn update_live(conn: &mut SqliteConnection, id: LiveId, patch: &LivePatch) -> Result<Live, StorageError> {
  diesel::update(lives::table.find(id.to_string()))
    .set(LiveChangeset::from(patch))
    .returning(LiveRow::as_returning())
    .get_result::<LiveRow>(conn)?
    .try_into()
}

pub fn delete_live(conn: &mut SqliteConnection, id: LiveId) -> Result<usize, StorageError> {
  Ok(diesel::delete(lives::table.find(id.to_string())).execute(conn)?)
}

/// Falla con violación de unicidad si `(live_id, order_index)` ya está ocupado.
pub fn insert_setlist_item(
  conn: &mut SqliteConnection,
  live_id: LiveId,
  song_id: SongId,
  order_index: i32,
) -> Result<SetlistItem, StorageError> {
  let id = SetlistItemId::new();
  diesel::insert_into(setlist_items::table).values(SetlistItemRow::new(id, live_id, song_id, order_index)).execute(conn)?;
  queries::setlist_item(conn, id)
}

pub fn update_setlist_order(
  conn: &mut SqliteConnection,
  id: SetlistItemId,
  order_index: i32,
) -> Result<SetlistItem, StorageError> {
  let updated = diesel::update(setlist_items::table.find(id.to_string()))
    .set((setlist_items::order_index.eq(order_index), setlist_items::updated_at.eq(models::now())))
    .execute(conn)?;
  if updated == 0 {
    return Err(StorageError::Query(diesel::result::Error::NotFound));
  }
  queries::setlist_item(conn, id)
}

pub fn delete_setlist_item(conn: &mut SqliteConnection, id: SetlistItemId) -> Result<usize, StorageError> {
  Ok(diesel::delete(setlist_items::table.find(id.to_string())).execute(conn)?)
}

pub fn clear_setlist(conn: &mut SqliteConnection, live_id: LiveId) -> Result<usize, StorageError> {
  Ok(diesel::delete(setlist_items::table.filter(setlist_items::live_id.eq(live_id.to_string()))).execute(conn)?)
}
