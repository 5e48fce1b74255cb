//! Filas de la base de datos y su conversión al dominio.
//!
//! Los ids son uuid en texto, los timestamps RFC 3339 (UTC, microsegundos, de
//! modo que el orden lexicográfico es el cronológico) y las fechas `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use diesel::prelude::*;
use std::str::FromStr;

use livelink_core::domain::{
  Band, BandId, Live, LiveFormData, LiveId, LivePatch, SetlistItem, SetlistItemId, Song, SongFormData, SongId,
  SongPatch,
};

use crate::error::StorageError;
use crate::schema::{bands, lives, setlist_items, songs};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn now() -> String {
  timestamp(Utc::now())
}

pub fn date_text(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

fn parse_id<T: FromStr>(table: &'static str, raw: &str) -> Result<T, StorageError>
where
  T::Err: std::fmt::Display,
{
  raw.parse().map_err(|e: T::Err| StorageError::Corrupt { table, reason: format!("id {raw:?}: {e}") })
}

fn parse_timestamp(table: &'static str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
  DateTime::parse_from_rfc3339(raw)
    .map(|at| at.with_timezone(&Utc))
    .map_err(|e| StorageError::Corrupt { table, reason: format!("timestamp {raw:?}: {e}") })
}

fn parse_date(table: &'static str, raw: &str) -> Result<NaiveDate, StorageError> {
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| StorageError::Corrupt { table, reason: format!("date {raw:?}: {e}") })
}

// ---- bands ----

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bands)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BandRow {
  pub id: String,
  pub name: String,
  pub description: Option<String>,
  pub avatar_url: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl BandRow {
  pub fn new(id: BandId, name: &str) -> Self {
    let now = now();
    BandRow { id: id.to_string(), name: name.to_string(), description: None, avatar_url: None, created_at: now.clone(), updated_at: now }
  }
}

impl TryFrom<BandRow> for Band {
  type Error = StorageError;

  fn try_from(row: BandRow) -> Result<Self, Self::Error> {
    Ok(Band {
      id: parse_id("bands", &row.id)?,
      name: row.name,
      description: row.description,
      avatar_url: row.avatar_url,
      created_at: parse_timestamp("bands", &row.created_at)?,
      updated_at: parse_timestamp("bands", &row.updated_at)?,
    })
  }
}

// ---- songs ----

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = songs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SongRow {
  pub id: String,
  pub band_id: String,
  pub title: String,
  pub artist: String,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl SongRow {
  pub fn new(band_id: BandId, form: &SongFormData) -> Self {
    let now = now();
    SongRow {
      id: SongId::new().to_string(),
      band_id: band_id.to_string(),
      title: form.title.trim().to_string(),
      artist: form.artist.trim().to_string(),
      youtube_url: form.youtube_url.clone(),
      spotify_url: form.spotify_url.clone(),
      created_at: now.clone(),
      updated_at: now,
    }
  }
}

impl TryFrom<SongRow> for Song {
  type Error = StorageError;

  fn try_from(row: SongRow) -> Result<Self, Self::Error> {
    Ok(Song {
      id: parse_id("songs", &row.id)?,
      band_id: parse_id("songs", &row.band_id)?,
      title: row.title,
      artist: row.artist,
      youtube_url: row.youtube_url,
      spotify_url: row.spotify_url,
      created_at: parse_timestamp("songs", &row.created_at)?,
      updated_at: parse_timestamp("songs", &row.updated_at)?,
    })
  }
}

/// `None` deja la columna como está.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = songs)]
pub struct SongChangeset {
  pub title: Option<String>,
  pub artist: Option<String>,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
  pub updated_at: String,
}

impl From<&SongPatch> for SongChangeset {
  fn from(patch: &SongPatch) -> Self {
    SongChangeset {
      title: patch.title.as_ref().map(|t| t.trim().to_string()),
      artist: patch.artist.as_ref().map(|a| a.trim().to_string()),
      youtube_url: patch.youtube_url.clone(),
      spotify_url: patch.spotify_url.clone(),
      updated_at: now(),
    }
  }
}

// ---- lives ----

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lives)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LiveRow {
  pub id: String,
  pub band_id: String,
  pub title: String,
  pub venue: String,
  pub date: String,
  pub description: Option<String>,
  pub ticket_url: Option<String>,
  pub is_upcoming: bool,
  pub share_slug: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl LiveRow {
  pub fn new(band_id: BandId, form: &LiveFormData) -> Self {
    let now = now();
    LiveRow {
      id: LiveId::new().to_string(),
      band_id: band_id.to_string(),
      title: form.title.trim().to_string(),
      venue: form.venue.trim().to_string(),
      date: date_text(form.date),
      description: form.description.clone(),
      ticket_url: form.ticket_url.clone(),
      is_upcoming: form.is_upcoming.unwrap_or(true),
      share_slug: form.share_slug.clone(),
      created_at: now.clone(),
      updated_at: now,
    }
  }
}

impl TryFrom<LiveRow> for Live {
  type Error = StorageError;

  fn try_from(row: LiveRow) -> Result<Self, Self::Error> {
    Ok(Live {
      id: parse_id("lives", &row.id)?,
      band_id: parse_id("lives", &row.band_id)?,
      title: row.title,
      venue: row.venue,
      date: parse_date("lives", &row.date)?,
      description: row.description,
      ticket_url: row.ticket_url,
      is_upcoming: row.is_upcoming,
      share_slug: row.share_slug,
      created_at: parse_timestamp("lives", &row.created_at)?,
      updated_at: parse_timestamp("lives", &row.updated_at)?,
    })
  }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = lives)]
pub struct LiveChangeset {
  pub title: Option<String>,
  pub venue: Option<String>,
  pub date: Option<String>,
  pub description: Option<String>,
  pub ticket_url: Option<String>,
  pub is_upcoming: Option<bool>,
  pub share_slug: Option<String>,
  pub updated_at: String,
}

impl From<&LivePatch> for LiveChangeset {
  fn from(patch: &LivePatch) -> Self {
    LiveChangeset {
      title: patch.title.as_ref().map(|t| t.trim().to_string()),
      venue: patch.venue.as_ref().map(|v| v.trim().to_string()),
      date: patch.date.map(date_text),
      description: patch.description.clone(),
      ticket_url: patch.ticket_url.clone(),
      is_upcoming: patch.is_upcoming,
      share_slug: patch.share_slug.clone(),
      updated_at: now(),
    }
  }
}

// ---- setlist_items ----

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = setlist_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SetlistItemRow {
  pub id: String,
  pub live_id: String,
  pub song_id: String,
  pub order_index: i32,
  pub created_at: String,
  pub updated_at: String,
}

impl SetlistItemRow {
  pub fn new(id: SetlistItemId, live_id: LiveId, song_id: SongId, order_index: i32) -> Self {
    let now = now();
    SetlistItemRow {
      id: id.to_string(),
      live_id: live_id.to_string(),
      song_id: song_id.to_string(),
      order_index,
      created_at: now.clone(),
      updated_at: now,
    }
  }

  /// Item con el join de su canción.
  pub fn with_song(self, song: SongRow) -> Result<SetlistItem, StorageError> {
    let song: Song = song.try_into()?;
    Ok(SetlistItem {
      id: parse_id("setlist_items", &self.id)?,
      live_id: parse_id("setlist_items", &self.live_id)?,
      song_id: parse_id("setlist_items", &self.song_id)?,
      order_index: self.order_index,
      created_at: parse_timestamp("setlist_items", &self.created_at)?,
      updated_at: parse_timestamp("setlist_items", &self.updated_at)?,
      song: Some(song.summary()),
    })
  }
}
