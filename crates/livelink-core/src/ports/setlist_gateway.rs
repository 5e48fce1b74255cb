use async_trait::async_trait;

use crate::domain::{LiveId, SetlistItem, SetlistItemId, SongId};
use crate::ports::response::ApiResponse;

/// Port de consultas sobre `setlist_items`.
///
/// El backend es el árbitro final del orden: rechaza cualquier alta o cambio
/// que duplique un `(live_id, order_index)`.
#[async_trait]
pub trait SetlistGateway: Send + Sync {
  /// Items del live con su canción, por `order_index` ascendente.
  async fn list_setlist(&self, live_id: LiveId) -> ApiResponse<Vec<SetlistItem>>;

  async fn add_setlist_song(&self, live_id: LiveId, song_id: SongId, order_index: i32) -> ApiResponse<SetlistItem>;

  async fn update_setlist_order(&self, id: SetlistItemId, order_index: i32) -> ApiResponse<SetlistItem>;

  async fn remove_setlist_song(&self, id: SetlistItemId) -> ApiResponse<()>;

  /// Borra todos los items de un live de una vez.
  async fn clear_setlist(&self, live_id: LiveId) -> ApiResponse<()>;
}
