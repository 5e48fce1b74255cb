use async_trait::async_trait;

use crate::domain::{BandId, Song, SongFormData, SongId, SongPatch};
use crate::ports::response::ApiResponse;

/// Port de consultas sobre la tabla `songs`.
#[async_trait]
pub trait SongGateway: Send + Sync {
  /// Todas las canciones de la banda, más nuevas primero.
  async fn list_songs(&self, band_id: BandId) -> ApiResponse<Vec<Song>>;

  /// Canciones cuyo título o artista contiene `query` (sin distinguir mayúsculas),
  /// más nuevas primero.
  async fn search_songs(&self, band_id: BandId, query: &str) -> ApiResponse<Vec<Song>>;

  async fn create_song(&self, band_id: BandId, form: &SongFormData) -> ApiResponse<Song>;
  async fn update_song(&self, id: SongId, patch: &SongPatch) -> ApiResponse<Song>;
  async fn delete_song(&self, id: SongId) -> ApiResponse<()>;
}
