//! Setlist del live seleccionado.
//!
//! El store es una caché de un solo foco: sólo guarda los items de
//! `current_live_id`. Todas las mutaciones siguen el mismo patrón: guardar lo
//! necesario para deshacer el cambio local, aplicarlo al momento, llamar al
//! gateway y después reconciliar (refetch) o deshacer. El error se devuelve
//! siempre al llamador, con el estado local ya consistente.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::setlist::{insert_in_order, next_order_index, sort_by_order};
use crate::domain::{LiveId, SetlistItem, SetlistItemId, SongId};
use crate::errors::CoreError;
use crate::ports::SetlistGateway;
use crate::stores::mutation::Mutation;
use crate::stores::resource::{FetchTicket, Resource, ResourceState};

pub type SetlistState = ResourceState<Option<LiveId>, SetlistItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
  Up,
  Down,
}

pub struct SetlistStore<G> {
  gateway: Arc<G>,
  resource: Arc<Resource<Option<LiveId>, SetlistItem>>,
}

impl<G> Clone for SetlistStore<G> {
  fn clone(&self) -> Self {
    Self { gateway: Arc::clone(&self.gateway), resource: Arc::clone(&self.resource) }
  }
}

impl<G: SetlistGateway> SetlistStore<G> {
  pub fn new(gateway: Arc<G>) -> Self {
    Self { gateway, resource: Arc::new(Resource::new(None)) }
  }

  pub fn subscribe(&self) -> watch::Receiver<SetlistState> {
    self.resource.subscribe()
  }

  pub fn state(&self) -> SetlistState {
    self.resource.snapshot()
  }

  pub fn items(&self) -> Vec<SetlistItem> {
    self.resource.items()
  }

  pub fn current_live_id(&self) -> Option<LiveId> {
    self.resource.key()
  }

  /// Selecciona el live cuyo setlist refleja el store y lo carga.
  ///
  /// Un fetch pendiente del live anterior queda superado: su respuesta se
  /// descarta al llegar. `None` vacía la lista sin tocar el backend.
  pub async fn set_current_live_id(&self, live_id: Option<LiveId>) -> Result<(), CoreError> {
    let ticket = self.resource.switch_key(live_id);
    self.run_fetch(ticket).await
  }

  /// Recarga el setlist del live actual.
  pub async fn refresh(&self) -> Result<(), CoreError> {
    let ticket = self.resource.begin_fetch();
    self.run_fetch(ticket).await
  }

  /// Setlist de `live_id` según el backend, ascendente por `order_index`.
  pub async fn fetch(&self, live_id: LiveId) -> Result<Vec<SetlistItem>, CoreError> {
    let mut items = self.gateway.list_setlist(live_id).await.into_list()?;
    sort_by_order(&mut items);
    Ok(items)
  }

  /// Añade `song_id` en `max(order_index) + 1`.
  ///
  /// Si `live_id` es el live actual aparece al momento un item provisional,
  /// que se sustituye por la fila del backend si todo va bien y se quita si
  /// falla. Una colisión en `(live_id, order_index)` con otro cliente se
  /// devuelve como error de backend; no se reintenta.
  pub async fn add_song(&self, live_id: LiveId, song_id: SongId) -> Result<bool, CoreError> {
    // El cálculo del índice y el append optimista van en la misma sección
    // crítica: dos adds locales nunca eligen el mismo índice.
    let provisional = self.resource.modify(|state| {
      if state.key != Some(live_id) {
        return None;
      }
      let item = SetlistItem::provisional(live_id, song_id, next_order_index(&state.items));
      let placed = (item.id, item.order_index);
      state.items.push(item);
      Some(placed)
    });

    let order_index = match provisional {
      Some((_, order_index)) => order_index,
      None => next_order_index(&self.fetch(live_id).await?),
    };

    let mut mutation = Mutation::begin("setlist.add_song", provisional.map(|(id, _)| id));
    if provisional.is_some() {
      mutation.applied();
    }

    match self.gateway.add_setlist_song(live_id, song_id, order_index).await.into_data() {
      Ok(created) => {
        mutation.commit();
        info!(%live_id, %song_id, order_index, item = %created.id, "song added to setlist");

        if let Some((temp_id, _)) = provisional {
          self.resource.replace_where(|item| item.id == temp_id, created);
        }
        self.reconcile(live_id).await;
        Ok(true)
      }
      Err(err) => {
        if let Some(temp_id) = mutation.roll_back(&err) {
          self.resource.remove_where(|item| item.id == temp_id);
        }
        Err(err)
      }
    }
  }

  /// Quita un item. Si falla, el item capturado vuelve a su sitio según
  /// `order_index`.
  pub async fn remove_song(&self, item_id: SetlistItemId) -> Result<bool, CoreError> {
    let removed = self.resource.remove_where(|item| item.id == item_id).map(|(_, item)| item);

    let mut mutation = Mutation::begin("setlist.remove_song", removed);
    if mutation.undo().is_some() {
      mutation.applied();
    }

    match self.gateway.remove_setlist_song(item_id).await.into_unit() {
      Ok(()) => {
        mutation.commit();
        Ok(true)
      }
      Err(err) => {
        if let Some(item) = mutation.roll_back(&err) {
          self.restore_item(item);
        }
        Err(err)
      }
    }
  }

  /// Mueve un item a `new_order_index`.
  ///
  /// Acabe como acabe, se recarga la lista entera: tras un conflicto de orden
  /// la suposición local no vale, y tras un éxito manda el backend.
  pub async fn update_order(&self, item_id: SetlistItemId, new_order_index: i32) -> Result<bool, CoreError> {
    let touched = self.resource.modify(|state| {
      let Some(item) = state.items.iter_mut().find(|item| item.id == item_id) else {
        return false;
      };
      item.order_index = new_order_index;
      sort_by_order(&mut state.items);
      true
    });

    let mut mutation = Mutation::begin("setlist.update_order", ());
    if touched {
      mutation.applied();
    }

    let result = self.gateway.update_setlist_order(item_id, new_order_index).await.into_data();
    let outcome = match result {
      Ok(updated) => {
        mutation.commit();
        debug!(item = %item_id, order_index = updated.order_index, "setlist order updated");
        Ok(true)
      }
      Err(err) => {
        mutation.roll_back(&err);
        Err(err)
      }
    };

    if let Some(live_id) = self.current_live_id() {
      self.reconcile(live_id).await;
    }
    outcome
  }

  /// Borra todos los items de `live_id`. Si falla, vuelve la lista anterior.
  pub async fn clear_setlist(&self, live_id: LiveId) -> Result<bool, CoreError> {
    let snapshot = self.resource.modify(|state| {
      if state.key != Some(live_id) {
        return None;
      }
      Some(std::mem::take(&mut state.items))
    });

    let mut mutation = Mutation::begin("setlist.clear", snapshot);
    if mutation.undo().is_some() {
      mutation.applied();
    }

    match self.gateway.clear_setlist(live_id).await.into_unit() {
      Ok(()) => {
        mutation.commit();
        info!(%live_id, "setlist cleared");
        Ok(true)
      }
      Err(err) => {
        if let Some(items) = mutation.roll_back(&err) {
          self.resource.modify(|state| {
            if state.key == Some(live_id) {
              state.items = items;
            }
          });
        }
        Err(err)
      }
    }
  }

  pub async fn move_up(&self, item_id: SetlistItemId) -> Result<bool, CoreError> {
    self.move_item(item_id, MoveDirection::Up).await
  }

  pub async fn move_down(&self, item_id: SetlistItemId) -> Result<bool, CoreError> {
    self.move_item(item_id, MoveDirection::Down).await
  }

  /// Intercambia el `order_index` del item con el de su vecino.
  ///
  /// Son tres llamadas a `update_order` pasando por un índice libre de
  /// aparcamiento (`max + 1`), así ningún paso intermedio rompe la unicidad de
  /// `(live_id, order_index)`. En los extremos devuelve `Ok(false)`.
  pub async fn move_item(&self, item_id: SetlistItemId, direction: MoveDirection) -> Result<bool, CoreError> {
    let mut items = self.items();
    sort_by_order(&mut items);

    let pos = items.iter().position(|item| item.id == item_id).ok_or(CoreError::NotFound)?;
    let neighbour = match direction {
      MoveDirection::Up => pos.checked_sub(1),
      MoveDirection::Down => Some(pos + 1).filter(|&n| n < items.len()),
    };

    let Some(neighbour) = neighbour else {
      debug!(item = %item_id, ?direction, "item already at the edge, nothing to move");
      return Ok(false);
    };

    let (target, other) = (&items[pos], &items[neighbour]);
    let parking = next_order_index(&items);

    self.update_order(target.id, parking).await?;
    self.update_order(other.id, target.order_index).await?;
    self.update_order(target.id, other.order_index).await?;
    Ok(true)
  }

  async fn run_fetch(&self, ticket: FetchTicket<Option<LiveId>>) -> Result<(), CoreError> {
    let result = match ticket.key {
      None => Ok(Vec::new()),
      Some(live_id) => self.fetch(live_id).await,
    };

    let failure = result.as_ref().err().cloned();
    if !self.resource.settle(&ticket, result) {
      warn!(generation = ticket.generation, "discarding stale setlist response");
      return Ok(());
    }

    match failure {
      Some(err) => {
        warn!(error = %err, "failed to load setlist");
        Err(err)
      }
      None => Ok(()),
    }
  }

  /// Refetch tras una mutación, si `live_id` sigue siendo el actual. Un fallo
  /// queda registrado en el estado; la mutación ya devolvió su propio
  /// resultado.
  async fn reconcile(&self, live_id: LiveId) {
    if self.current_live_id() != Some(live_id) {
      return;
    }
    let _ = self.refresh().await;
  }

  fn restore_item(&self, item: SetlistItem) {
    self.resource.modify(|state| {
      if state.key == Some(item.live_id) && !state.items.iter().any(|existing| existing.id == item.id) {
        insert_in_order(&mut state.items, item);
      }
    });
  }
}
