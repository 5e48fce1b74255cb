// crates/livelink-core/src/errors.rs
use thiserror::Error;

use crate::validation::ValidationError;

/// Error genérico del núcleo de LiveLink.
///
/// Las capas superiores (CLI, UI) deberían mapear este error a mensajes de
/// usuario o logs. Ninguno es fatal: cada uno queda acotado a la operación que
/// lo produjo.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
  /// El formulario no pasó la validación del lado cliente; nunca llega a un store.
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  /// El gateway devolvió un `error` en una mutación. El store ya restauró su
  /// estado local (rollback o refetch) antes de devolverlo.
  #[error("backend error: {0}")]
  Backend(String),

  /// El gateway devolvió un `error` al cargar una lista.
  #[error("fetch error: {0}")]
  Fetch(String),

  #[error("not found")]
  NotFound,
}
