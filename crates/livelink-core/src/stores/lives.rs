//! Lives de una banda. La clave de fetch es la propia banda: sólo hay una
//! lista.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{BandId, Live, LiveFormData, LiveId, LivePatch};
use crate::errors::CoreError;
use crate::ports::LiveGateway;
use crate::stores::mutation::Mutation;
use crate::stores::resource::{FetchTicket, Resource, ResourceState};

pub type LivesState = ResourceState<BandId, Live>;

pub struct LivesStore<G> {
  gateway: Arc<G>,
  resource: Arc<Resource<BandId, Live>>,
}

impl<G> Clone for LivesStore<G> {
  fn clone(&self) -> Self {
    Self { gateway: Arc::clone(&self.gateway), resource: Arc::clone(&self.resource) }
  }
}

fn sort_by_date_desc(lives: &mut [Live]) {
  lives.sort_by(|a, b| b.date.cmp(&a.date));
}

fn insert_by_date_desc(lives: &mut Vec<Live>, live: Live) {
  let pos = lives.partition_point(|existing| existing.date >= live.date);
  lives.insert(pos, live);
}

impl<G: LiveGateway> LivesStore<G> {
  pub fn new(gateway: Arc<G>, band_id: BandId) -> Self {
    Self { gateway, resource: Arc::new(Resource::new(band_id)) }
  }

  pub fn band_id(&self) -> BandId {
    self.resource.key()
  }

  pub fn subscribe(&self) -> watch::Receiver<LivesState> {
    self.resource.subscribe()
  }

  pub fn state(&self) -> LivesState {
    self.resource.snapshot()
  }

  pub fn lives(&self) -> Vec<Live> {
    self.resource.items()
  }

  pub fn find(&self, id: LiveId) -> Option<Live> {
    self.resource.snapshot().items.into_iter().find(|live| live.id == id)
  }

  /// Lives cargados marcados como próximos, el más cercano primero.
  pub fn upcoming(&self) -> Vec<Live> {
    let mut upcoming: Vec<Live> = self.lives().into_iter().filter(|live| live.is_upcoming).collect();
    upcoming.sort_by_key(|live| live.date);
    upcoming
  }

  pub async fn refresh(&self) -> Result<(), CoreError> {
    let ticket = self.resource.begin_fetch();
    self.run_fetch(ticket).await
  }

  /// Todos los lives de la banda, de fecha más reciente a más antigua.
  pub async fn fetch(&self) -> Result<Vec<Live>, CoreError> {
    let mut lives = self.gateway.list_lives(self.band_id()).await.into_list()?;
    sort_by_date_desc(&mut lives);
    Ok(lives)
  }

  pub async fn create_live(&self, form: LiveFormData) -> Result<bool, CoreError> {
    let band_id = self.band_id();
    let now = Utc::now();
    let provisional = Live {
      id: LiveId::new(),
      band_id,
      title: form.title.clone(),
      venue: form.venue.clone(),
      date: form.date,
      description: form.description.clone(),
      ticket_url: form.ticket_url.clone(),
      is_upcoming: form.is_upcoming.unwrap_or(true),
      share_slug: form.share_slug.clone(),
      created_at: now,
      updated_at: now,
    };
    let temp_id = provisional.id;

    self.resource.modify(|state| insert_by_date_desc(&mut state.items, provisional));
    let mut mutation = Mutation::begin("lives.create", temp_id);
    mutation.applied();

    match self.gateway.create_live(band_id, &form).await.into_data() {
      Ok(created) => {
        mutation.commit();
        info!(live = %created.id, title = %created.title, "live created");
        self.resource.replace_where(|live| live.id == temp_id, created);
        self.reconcile().await;
        Ok(true)
      }
      Err(err) => {
        let temp_id = mutation.roll_back(&err);
        self.resource.remove_where(|live| live.id == temp_id);
        Err(err)
      }
    }
  }

  pub async fn update_live(&self, id: LiveId, patch: LivePatch) -> Result<bool, CoreError> {
    let touched = self.resource.modify(|state| {
      let Some(live) = state.items.iter_mut().find(|live| live.id == id) else {
        return false;
      };
      patch.apply_to(live);
      sort_by_date_desc(&mut state.items);
      true
    });

    let mut mutation = Mutation::begin("lives.update", ());
    if touched {
      mutation.applied();
    }

    let outcome = match self.gateway.update_live(id, &patch).await.into_data() {
      Ok(_) => {
        mutation.commit();
        Ok(true)
      }
      Err(err) => {
        mutation.roll_back(&err);
        Err(err)
      }
    };

    self.reconcile().await;
    outcome
  }

  /// Borrar un live borra también su setlist (cascada en el backend).
  pub async fn delete_live(&self, id: LiveId) -> Result<bool, CoreError> {
    let removed = self.resource.remove_where(|live| live.id == id).map(|(_, live)| live);

    let mut mutation = Mutation::begin("lives.delete", removed);
    if mutation.undo().is_some() {
      mutation.applied();
    }

    match self.gateway.delete_live(id).await.into_unit() {
      Ok(()) => {
        mutation.commit();
        info!(live = %id, "live deleted");
        Ok(true)
      }
      Err(err) => {
        if let Some(live) = mutation.roll_back(&err) {
          self.resource.modify(|state| {
            if !state.items.iter().any(|existing| existing.id == live.id) {
              insert_by_date_desc(&mut state.items, live);
            }
          });
        }
        Err(err)
      }
    }
  }

  async fn run_fetch(&self, ticket: FetchTicket<BandId>) -> Result<(), CoreError> {
    let result = self.fetch().await;

    let failure = result.as_ref().err().cloned();
    if !self.resource.settle(&ticket, result) {
      warn!(generation = ticket.generation, "discarding stale lives response");
      return Ok(());
    }

    match failure {
      Some(err) => {
        warn!(error = %err, "failed to load lives");
        Err(err)
      }
      None => Ok(()),
    }
  }

  /// Refetch tras una mutación. Un fallo queda registrado en el estado; la
  /// mutación ya devolvió su propio resultado.
  async fn reconcile(&self) {
    let _ = self.refresh().await;
  }
}
