//! Estado de lista con clave y generación, común a todos los stores.
//!
//! Un `Resource` guarda la lista cargada para una clave de fetch (live actual,
//! búsqueda, banda). Cada ciclo de fetch recibe un `FetchTicket` con una
//! generación creciente; la respuesta sólo se aplica si su ticket sigue siendo
//! el último emitido, así una respuesta lenta de una clave vieja nunca pisa la
//! lista de la nueva.

use tokio::sync::watch;

use crate::errors::CoreError;

/// Lo que ven los lectores de la lista de un store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<K, T> {
  pub key: K,
  pub items: Vec<T>,
  pub loading: bool,
  pub error: Option<String>,
  pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchTicket<K> {
  pub key: K,
  pub generation: u64,
}

#[derive(Debug)]
pub struct Resource<K, T> {
  tx: watch::Sender<ResourceState<K, T>>,
}

impl<K, T> Resource<K, T>
where
  K: Clone + Default + PartialEq,
  T: Clone,
{
  pub fn new(key: K) -> Self {
    let state = ResourceState { key, items: Vec::new(), loading: false, error: None, generation: 0 };
    Self { tx: watch::Sender::new(state) }
  }

  /// Lectura reactiva: los receptores se enteran de cada cambio aplicado.
  pub fn subscribe(&self) -> watch::Receiver<ResourceState<K, T>> {
    self.tx.subscribe()
  }

  pub fn snapshot(&self) -> ResourceState<K, T> {
    self.tx.borrow().clone()
  }

  pub fn items(&self) -> Vec<T> {
    self.tx.borrow().items.clone()
  }

  pub fn key(&self) -> K {
    self.tx.borrow().key.clone()
  }

  /// Apunta el recurso a `key` y abre un ciclo de fetch nuevo. Los items de
  /// otra clave se descartan al momento.
  pub fn switch_key(&self, key: K) -> FetchTicket<K> {
    self.modify(|state| {
      if state.key != key {
        state.items.clear();
        state.key = key.clone();
      }
      Self::open_cycle(state)
    })
  }

  /// Abre un ciclo de fetch para la clave actual; el pendiente queda superado.
  pub fn begin_fetch(&self) -> FetchTicket<K> {
    self.modify(Self::open_cycle)
  }

  /// Aplica el resultado de un ciclo de fetch. Devuelve `false` (sin tocar el
  /// estado) si el ticket ya fue superado.
  ///
  /// Con error se mantienen los últimos items buenos y se guarda el mensaje.
  pub fn settle(&self, ticket: &FetchTicket<K>, result: Result<Vec<T>, CoreError>) -> bool {
    self.tx.send_if_modified(|state| {
      if state.generation != ticket.generation || state.key != ticket.key {
        return false;
      }

      match result {
        Ok(items) => {
          state.items = items;
          state.error = None;
        }
        Err(err) => state.error = Some(err.to_string()),
      }
      state.loading = false;
      true
    })
  }

  /// Aplica `f` al estado bajo el lock del canal y avisa a los lectores.
  pub fn modify<R: Default>(&self, f: impl FnOnce(&mut ResourceState<K, T>) -> R) -> R {
    let mut out = R::default();
    self.tx.send_modify(|state| out = f(state));
    out
  }

  /// Quita el primer item que cumple `pred` y lo devuelve con su posición.
  pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> Option<(usize, T)> {
    self.modify(|state| {
      let pos = state.items.iter().position(|item| pred(item))?;
      Some((pos, state.items.remove(pos)))
    })
  }

  /// Sustituye el primer item que cumple `pred`. Indica si encontró alguno.
  pub fn replace_where(&self, pred: impl Fn(&T) -> bool, item: T) -> bool {
    self.modify(|state| match state.items.iter_mut().find(|existing| pred(existing)) {
      Some(slot) => {
        *slot = item;
        true
      }
      None => false,
    })
  }

  fn open_cycle(state: &mut ResourceState<K, T>) -> FetchTicket<K> {
    state.generation += 1;
    state.loading = true;
    state.error = None;
    FetchTicket { key: state.key.clone(), generation: state.generation }
  }
}
