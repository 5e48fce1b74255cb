use async_trait::async_trait;

use crate::domain::{BandId, Live, LiveFormData, LiveId, LivePatch};
use crate::ports::response::ApiResponse;

/// Port de consultas sobre la tabla `lives`.
#[async_trait]
pub trait LiveGateway: Send + Sync {
  /// Todos los lives de la banda, por fecha descendente.
  async fn list_lives(&self, band_id: BandId) -> ApiResponse<Vec<Live>>;
  async fn create_live(&self, band_id: BandId, form: &LiveFormData) -> ApiResponse<Live>;
  async fn update_live(&self, id: LiveId, patch: &LivePatch) -> ApiResponse<Live>;
  async fn delete_live(&self, id: LiveId) -> ApiResponse<()>;
}
