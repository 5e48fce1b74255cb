//! Catálogo de canciones de la banda, con la búsqueda actual como clave.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{BandId, Song, SongFormData, SongId, SongPatch};
use crate::errors::CoreError;
use crate::ports::SongGateway;
use crate::search;
use crate::stores::mutation::Mutation;
use crate::stores::resource::{FetchTicket, Resource, ResourceState};

pub type SongsState = ResourceState<String, Song>;

pub struct SongsStore<G> {
  gateway: Arc<G>,
  band_id: BandId,
  resource: Arc<Resource<String, Song>>,
}

impl<G> Clone for SongsStore<G> {
  fn clone(&self) -> Self {
    Self { gateway: Arc::clone(&self.gateway), band_id: self.band_id, resource: Arc::clone(&self.resource) }
  }
}

/// Más nuevas primero, como las ordena el backend.
fn insert_newest_first(songs: &mut Vec<Song>, song: Song) {
  let pos = songs.partition_point(|existing| existing.created_at > song.created_at);
  songs.insert(pos, song);
}

impl<G: SongGateway> SongsStore<G> {
  pub fn new(gateway: Arc<G>, band_id: BandId) -> Self {
    Self { gateway, band_id, resource: Arc::new(Resource::new(String::new())) }
  }

  pub fn band_id(&self) -> BandId {
    self.band_id
  }

  pub fn subscribe(&self) -> watch::Receiver<SongsState> {
    self.resource.subscribe()
  }

  pub fn state(&self) -> SongsState {
    self.resource.snapshot()
  }

  pub fn songs(&self) -> Vec<Song> {
    self.resource.items()
  }

  pub fn search_query(&self) -> String {
    self.resource.key()
  }

  /// Cambia la búsqueda y recarga. La respuesta de una búsqueda anterior se descarta.
  pub async fn set_search_query(&self, query: impl Into<String>) -> Result<(), CoreError> {
    let ticket = self.resource.switch_key(query.into());
    self.run_fetch(ticket).await
  }

  pub async fn refresh(&self) -> Result<(), CoreError> {
    let ticket = self.resource.begin_fetch();
    self.run_fetch(ticket).await
  }

  /// Canciones de la banda que contienen todas las palabras de `query`.
  ///
  /// La primera palabra filtra en el backend; el resto se aplica aquí sobre
  /// `"title artist"`.
  pub async fn fetch(&self, query: &str) -> Result<Vec<Song>, CoreError> {
    let keywords = search::keywords(query);

    let songs = match keywords.first() {
      None => self.gateway.list_songs(self.band_id).await.into_list()?,
      Some(first) => self.gateway.search_songs(self.band_id, first).await.into_list()?,
    };

    Ok(search::filter_songs(songs, &keywords))
  }

  pub async fn create_song(&self, form: SongFormData) -> Result<bool, CoreError> {
    let now = Utc::now();
    let provisional = Song {
      id: SongId::new(),
      band_id: self.band_id,
      title: form.title.clone(),
      artist: form.artist.clone(),
      youtube_url: form.youtube_url.clone(),
      spotify_url: form.spotify_url.clone(),
      created_at: now,
      updated_at: now,
    };
    let temp_id = provisional.id;

    // Sólo se muestra si pasa el filtro activo.
    let shown = self.resource.modify(|state| {
      if !search::matches(&provisional, &search::keywords(&state.key)) {
        return false;
      }
      insert_newest_first(&mut state.items, provisional);
      true
    });

    let mut mutation = Mutation::begin("songs.create", temp_id);
    if shown {
      mutation.applied();
    }

    match self.gateway.create_song(self.band_id, &form).await.into_data() {
      Ok(created) => {
        mutation.commit();
        info!(song = %created.id, title = %created.title, "song created");
        self.resource.replace_where(|song| song.id == temp_id, created);
        self.reconcile().await;
        Ok(true)
      }
      Err(err) => {
        let temp_id = mutation.roll_back(&err);
        self.resource.remove_where(|song| song.id == temp_id);
        Err(err)
      }
    }
  }

  /// Aplica el parche en local y luego recarga lo que diga el backend.
  pub async fn update_song(&self, id: SongId, patch: SongPatch) -> Result<bool, CoreError> {
    let touched = self.resource.modify(|state| match state.items.iter_mut().find(|song| song.id == id) {
      Some(song) => {
        patch.apply_to(song);
        true
      }
      None => false,
    });

    let mut mutation = Mutation::begin("songs.update", ());
    if touched {
      mutation.applied();
    }

    let outcome = match self.gateway.update_song(id, &patch).await.into_data() {
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

  /// Borrar una canción la quita de todos los setlists (cascada en el backend).
  pub async fn delete_song(&self, id: SongId) -> Result<bool, CoreError> {
    let removed = self.resource.remove_where(|song| song.id == id).map(|(_, song)| song);

    let mut mutation = Mutation::begin("songs.delete", removed);
    if mutation.undo().is_some() {
      mutation.applied();
    }

    match self.gateway.delete_song(id).await.into_unit() {
      Ok(()) => {
        mutation.commit();
        info!(song = %id, "song deleted");
        Ok(true)
      }
      Err(err) => {
        if let Some(song) = mutation.roll_back(&err) {
          self.resource.modify(|state| {
            if !state.items.iter().any(|existing| existing.id == song.id) {
              insert_newest_first(&mut state.items, song);
            }
          });
        }
        Err(err)
      }
    }
  }

  async fn run_fetch(&self, ticket: FetchTicket<String>) -> Result<(), CoreError> {
    let result = self.fetch(&ticket.key).await;

    let failure = result.as_ref().err().cloned();
    if !self.resource.settle(&ticket, result) {
      warn!(query = %ticket.key, "discarding stale song search response");
      return Ok(());
    }

    match failure {
      Some(err) => {
        warn!(error = %err, "failed to load songs");
        Err(err)
      }
      None => Ok(()),
    }
  }

  /// Refetch tras una mutación; un fallo queda en el estado.
  async fn reconcile(&self) {
    let _ = self.refresh().await;
  }
}
