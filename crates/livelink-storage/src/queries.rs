//! Lecturas.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use livelink_core::domain::{Band, BandId, Live, LiveId, SetlistItem, SetlistItemId, SharedLive, Song};

use crate::error::StorageError;
use crate::models::{BandRow, LiveRow, SetlistItemRow, SongRow};
use crate::schema::{bands, lives, setlist_items, songs};

fn into_domain<R, T>(rows: Vec<R>) -> Result<Vec<T>, StorageError>
where
  T: TryFrom<R, Error = StorageError>,
{
  rows.into_iter().map(T::try_from).collect()
}

pub fn find_band(conn: &mut SqliteConnection, id: BandId) -> Result<Option<Band>, StorageError> {
  bands::table
    .find(id.to_string())
    .select(BandRow::as_select())
    .first::<BandRow>(conn)
    .optional()?
    .map(Band::try_from)
    .transpose()
}

pub fn songs_by_band(conn: &mut SqliteConnection, band_id: BandId) -> Result<Vec<Song>, StorageError> {
  let rows = songs::table
    .filter(songs::band_id.eq(band_id.to_string()))
    .order(songs::created_at.desc())
    .select(SongRow::as_select())
    .load::<SongRow>(conn)?;
  into_domain(rows)
}

/// Título o artista contiene `query`, sin distinguir mayúsculas.
///
/// El `LIKE` de SQLite sólo ignora mayúsculas en ASCII, así que la comparación
/// se hace aquí con minúsculas Unicode sobre las canciones de la banda.
pub fn search_songs(conn: &mut SqliteConnection, band_id: BandId, query: &str) -> Result<Vec<Song>, StorageError> {
  let needle = query.to_lowercase();
  let songs = songs_by_band(conn, band_id)?;
  Ok(songs.into_iter().filter(|song| contains_folded(song, &needle)).collect())
}

fn contains_folded(song: &Song, needle: &str) -> bool {
  song.title.to_lowercase().contains(needle) || song.artist.to_lowercase().contains(needle)
}

pub fn lives_by_band(conn: &mut SqliteConnection, band_id: BandId) -> Result<Vec<Live>, StorageError> {
  let rows = lives::table
    .filter(lives::band_id.eq(band_id.to_string()))
    .order((lives::date.desc(), lives::created_at.desc()))
    .select(LiveRow::as_select())
    .load::<LiveRow>(conn)?;
  into_domain(rows)
}

pub fn setlist_by_live(conn: &mut SqliteConnection, live_id: LiveId) -> Result<Vec<SetlistItem>, StorageError> {
  setlist_items::table
    .inner_join(songs::table)
    .filter(setlist_items::live_id.eq(live_id.to_string()))
    .order(setlist_items::order_index.asc())
    .select((SetlistItemRow::as_select(), SongRow::as_select()))
    .load::<(SetlistItemRow, SongRow)>(conn)?
    .into_iter()
    .map(|(item, song)| item.with_song(song))
    .collect()
}

pub fn setlist_item(conn: &mut SqliteConnection, id: SetlistItemId) -> Result<SetlistItem, StorageError> {
  let (item, song) = setlist_items::table
    .inner_join(songs::table)
    .filter(setlist_items::id.eq(id.to_string()))
    .select((SetlistItemRow::as_select(), SongRow::as_select()))
    .first::<(SetlistItemRow, SongRow)>(conn)?;
  item.with_song(song)
}

pub fn shared_live(conn: &mut SqliteConnection, share_slug: &str) -> Result<Option<SharedLive>, StorageError> {
  let Some((live, band)) = lives::table
    .inner_join(bands::table)
    .filter(lives::share_slug.eq(share_slug))
    .select((LiveRow::as_select(), BandRow::as_select()))
    .first::<(LiveRow, BandRow)>(conn)
    .optional()?
  else {
    return Ok(None);
  };

  Ok(Some(SharedLive { live: live.try_into()?, band: band.try_into()? }))
}

pub fn share_slug_exists(conn: &mut SqliteConnection, share_slug: &str) -> Result<bool, StorageError> {
  let found: i64 = lives::table.filter(lives::share_slug.eq(share_slug)).count().get_result(conn)?;
  Ok(found > 0)
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use livelink_core::domain::SongId;

  use super::*;

  fn song(title: &str, artist: &str) -> Song {
    let now = Utc::now();
    Song {
      id: SongId::new(),
      band_id: BandId::new(),
      title: title.into(),
      artist: artist.into(),
      youtube_url: None,
      spotify_url: None,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn folded_match_covers_non_ascii() {
    let s = song("Привет", "Ärzte");

    assert!(contains_folded(&s, "привет"));
    assert!(contains_folded(&s, "ärzte"));
    assert!(contains_folded(&s, &"ПРИВЕТ".to_lowercase()));
    assert!(!contains_folded(&s, "hallo"));
  }
}
