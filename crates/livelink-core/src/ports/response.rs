use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Forma uniforme de respuesta del gateway: `{data, error}`.
///
/// Éxito = `error` ausente. `data` puede faltar en operaciones que no devuelven
/// nada (borrados).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub data: Option<T>,
  pub error: Option<String>,
}

impl<T> ApiResponse<T> {
  pub fn ok(data: T) -> Self {
    Self { data: Some(data), error: None }
  }

  pub fn err(message: impl Into<String>) -> Self {
    Self { data: None, error: Some(message.into()) }
  }

  pub fn is_ok(&self) -> bool {
    self.error.is_none()
  }

  /// Para mutaciones que deben devolver la fila afectada.
  pub fn into_data(self) -> Result<T, CoreError> {
    match (self.data, self.error) {
      (_, Some(msg)) => Err(CoreError::Backend(msg)),
      (Some(data), None) => Ok(data),
      (None, None) => Err(CoreError::Backend("backend returned no data".to_string())),
    }
  }

  pub fn into_unit(self) -> Result<(), CoreError> {
    match self.error {
      Some(msg) => Err(CoreError::Backend(msg)),
      None => Ok(()),
    }
  }
}

impl ApiResponse<()> {
  pub fn done() -> Self {
    Self { data: None, error: None }
  }
}

impl<T> ApiResponse<Vec<T>> {
  /// Para cargas de listas: un `data` nulo sin error cuenta como lista vacía.
  pub fn into_list(self) -> Result<Vec<T>, CoreError> {
    match self.error {
      Some(msg) => Err(CoreError::Fetch(msg)),
      None => Ok(self.data.unwrap_or_default()),
    }
  }
}

impl<T> From<Result<T, String>> for ApiResponse<T> {
  fn from(res: Result<T, String>) -> Self {
    match res {
      Ok(data) => ApiResponse::ok(data),
      Err(msg) => ApiResponse::err(msg),
    }
  }
}
