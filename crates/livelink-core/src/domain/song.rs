use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BandId, SongId};

/// La Canción (Song): una pieza del repertorio de la banda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único de la canción dentro del sistema.
  pub id: SongId,
  /// Banda dueña de la canción.
  pub band_id: BandId,
  /// El título de la canción.
  pub title: String,
  /// El/los intérprete(s) originales.
  pub artist: String,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Song {
  /// Texto sobre el que se evalúan las búsquedas: `"title artist"` en minúsculas.
  pub fn search_text(&self) -> String {
    format!("{} {}", self.title, self.artist).to_lowercase()
  }

  /// Vista reducida usada como join desnormalizado en setlists y en el share.
  pub fn summary(&self) -> SongSummary {
    SongSummary {
      id: self.id,
      title: self.title.clone(),
      artist: self.artist.clone(),
      youtube_url: self.youtube_url.clone(),
      spotify_url: self.spotify_url.clone(),
    }
  }
}

/// Los campos de una canción que viajan junto a un item de setlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongSummary {
  pub id: SongId,
  pub title: String,
  pub artist: String,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
}

/// Datos de formulario para crear una canción.
///
/// Excluye los campos que gestiona el backend (id, timestamps, band_id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongFormData {
  pub title: String,
  pub artist: String,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
}

/// Actualización parcial: sólo se tocan los campos presentes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongPatch {
  pub title: Option<String>,
  pub artist: Option<String>,
  pub youtube_url: Option<String>,
  pub spotify_url: Option<String>,
}

impl SongPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none() && self.artist.is_none() && self.youtube_url.is_none() && self.spotify_url.is_none()
  }

  /// Aplica el parche sobre una copia local (usado por la actualización optimista).
  pub fn apply_to(&self, song: &mut Song) {
    if let Some(title) = &self.title {
      song.title = title.clone();
    }
    if let Some(artist) = &self.artist {
      song.artist = artist.clone();
    }
    if let Some(url) = &self.youtube_url {
      song.youtube_url = Some(url.clone());
    }
    if let Some(url) = &self.spotify_url {
      song.spotify_url = Some(url.clone());
    }
  }
}
