//! Ciclo de vida de una mutación optimista.
//!
//! ```text
//! Idle ──apply──▶ Optimistic ──┬─commit────▶ Committed
//!   │                          └─roll_back─▶ RolledBack
//!   └───────── commit / roll_back (nothing was applied locally)
//! ```
//!
//! La mutación es dueña del snapshot capturado antes del cambio local: una
//! petición fallida sólo puede restaurar lo que cambió su propio llamador.

use tracing::{debug, info, warn};

use crate::errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
  Idle,
  Optimistic,
  Committed,
  RolledBack,
}

impl MutationPhase {
  pub fn can_transition_to(self, next: MutationPhase) -> bool {
    use MutationPhase::*;
    matches!(
      (self, next),
      (Idle, Optimistic) | (Idle, Committed) | (Idle, RolledBack) | (Optimistic, Committed) | (Optimistic, RolledBack)
    )
  }

  pub fn is_settled(self) -> bool {
    matches!(self, MutationPhase::Committed | MutationPhase::RolledBack)
  }
}

#[derive(Debug)]
pub struct Mutation<S> {
  op: &'static str,
  phase: MutationPhase,
  undo: S,
}

impl<S> Mutation<S> {
  pub fn begin(op: &'static str, undo: S) -> Self {
    Mutation { op, phase: MutationPhase::Idle, undo }
  }

  pub fn phase(&self) -> MutationPhase {
    self.phase
  }

  pub fn undo(&self) -> &S {
    &self.undo
  }

  /// Marca que el cambio especulativo ya es visible para los lectores.
  pub fn applied(&mut self) {
    self.transition(MutationPhase::Optimistic);
    debug!(op = self.op, "optimistic update applied");
  }

  pub fn commit(mut self) -> MutationPhase {
    self.transition(MutationPhase::Committed);
    info!(op = self.op, "mutation committed");
    self.phase
  }

  /// Devuelve el snapshot para deshacer. Lo restaura el llamador (o recarga).
  pub fn roll_back(mut self, err: &CoreError) -> S {
    self.transition(MutationPhase::RolledBack);
    warn!(op = self.op, error = %err, "mutation failed, rolling back");
    self.undo
  }

  fn transition(&mut self, next: MutationPhase) {
    debug_assert!(self.phase.can_transition_to(next), "{}: illegal transition {:?} -> {:?}", self.op, self.phase, next);
    self.phase = next;
  }
}
