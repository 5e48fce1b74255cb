//! Búsqueda de canciones por palabras clave.
//!
//! La consulta se parte por espacios; cada palabra tiene que aparecer (sin
//! distinguir mayúsculas) en el texto `"title artist"` de la canción.

use crate::domain::Song;

/// Palabras clave normalizadas de una consulta. Vacío = sin filtro.
pub fn keywords(query: &str) -> Vec<String> {
  query.split_whitespace().map(str::to_lowercase).collect()
}

pub fn matches(song: &Song, keywords: &[String]) -> bool {
  if keywords.is_empty() {
    return true;
  }

  let text = song.search_text();
  keywords.iter().all(|k| text.contains(k.as_str()))
}

pub fn filter_songs(songs: Vec<Song>, keywords: &[String]) -> Vec<Song> {
  songs.into_iter().filter(|song| matches(song, keywords)).collect()
}
