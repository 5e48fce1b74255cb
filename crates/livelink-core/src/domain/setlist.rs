use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{LiveId, SetlistItemId, SongId};
use crate::domain::song::SongSummary;

/// Título que muestra un item mientras el backend todavía no confirmó el alta.
pub const PENDING_SONG_TITLE: &str = "Adding song...";

/// Una fila de la tabla puente: coloca una canción en una posición del setlist
/// de un live.
///
/// Para un `live_id` fijo, los `order_index` son únicos (lo garantiza el backend)
/// y el orden ascendente es el orden de presentación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetlistItem {
  pub id: SetlistItemId,
  pub live_id: LiveId,
  pub song_id: SongId,
  pub order_index: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Join desnormalizado para mostrar; nunca es autoritativo para la identidad.
  pub song: Option<SongSummary>,
}

impl SetlistItem {
  /// Item provisional para la actualización optimista de `add_song`.
  ///
  /// Lleva un id local nuevo y datos de canción de relleno.
  pub fn provisional(live_id: LiveId, song_id: SongId, order_index: i32) -> Self {
    let now = Utc::now();
    SetlistItem {
      id: SetlistItemId::new(),
      live_id,
      song_id,
      order_index,
      created_at: now,
      updated_at: now,
      song: Some(SongSummary {
        id: song_id,
        title: PENDING_SONG_TITLE.to_string(),
        artist: String::new(),
        youtube_url: None,
        spotify_url: None,
      }),
    }
  }

  pub fn title(&self) -> &str {
    self.song.as_ref().map(|s| s.title.as_str()).unwrap_or_default()
  }
}

/// Siguiente índice libre al final del setlist: `max + 1`, o `1` si está vacío.
pub fn next_order_index(items: &[SetlistItem]) -> i32 {
  items.iter().map(|item| item.order_index).max().unwrap_or(0) + 1
}

/// Ordena por `order_index` ascendente (estable).
pub fn sort_by_order(items: &mut [SetlistItem]) {
  items.sort_by_key(|item| item.order_index);
}

/// Inserta `item` en la posición que le corresponde según `order_index`,
/// detrás de cualquier item con el mismo índice.
pub fn insert_in_order(items: &mut Vec<SetlistItem>, item: SetlistItem) {
  let pos = items.partition_point(|existing| existing.order_index <= item.order_index);
  items.insert(pos, item);
}
