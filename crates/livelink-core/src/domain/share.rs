use serde::{Deserialize, Serialize};

use crate::domain::band::Band;
use crate::domain::ids::SetlistItemId;
use crate::domain::live::Live;
use crate::domain::song::SongSummary;

/// Un live publicado junto a su banda, tal como lo resuelve el backend por slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedLive {
  pub live: Live,
  pub band: Band,
}

/// Entrada pública del setlist: sólo posición y canción.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareEntry {
  pub id: SetlistItemId,
  pub order_index: i32,
  pub song: SongSummary,
}

/// Metadatos para previsualizaciones en redes sociales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareMetadata {
  pub title: String,
  pub description: String,
  pub social_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareMetrics {
  /// Milisegundos, redondeado a dos decimales.
  pub query_time_ms: f64,
  pub song_count: usize,
}

/// Instantánea pública de un setlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareSnapshot {
  pub live: Live,
  pub band: Band,
  pub setlist: Vec<ShareEntry>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<ShareMetadata>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metrics: Option<ShareMetrics>,
}
