use async_trait::async_trait;

use crate::domain::SharedLive;
use crate::ports::response::ApiResponse;

/// Port de lectura pública por `share_slug`.
#[async_trait]
pub trait ShareGateway: Send + Sync {
  /// Live publicado con su banda. `data: None` sin error = slug desconocido.
  async fn find_shared_live(&self, share_slug: &str) -> ApiResponse<Option<SharedLive>>;

  /// ¿Algún live usa ya este slug?
  async fn share_slug_exists(&self, share_slug: &str) -> ApiResponse<bool>;
}
