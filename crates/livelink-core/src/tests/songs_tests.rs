use std::sync::Arc;

use super::fake_gateway::FakeGateway;
use crate::domain::{BandId, Song, SongFormData, SongPatch};
use crate::errors::CoreError;
use crate::stores::SongsStore;

async fn store_with(catalogue: &[(&str, &str)]) -> (Arc<FakeGateway>, SongsStore<FakeGateway>, BandId) {
  let gateway = FakeGateway::new();
  let band = gateway.seed_band("Kinoko");
  for (title, artist) in catalogue {
    gateway.seed_song(band.id, title, artist);
  }

  let store = SongsStore::new(Arc::clone(&gateway), band.id);
  store.refresh().await.unwrap();
  gateway.clear_calls();
  (gateway, store, band.id)
}

fn titles(songs: &[Song]) -> Vec<&str> {
  songs.iter().map(|song| song.title.as_str()).collect()
}

const CATALOGUE: &[(&str, &str)] =
  &[("Blackbird", "The Beatles"), ("Black Dog", "Led Zeppelin"), ("Yesterday", "The Beatles")];

#[tokio::test]
async fn songs_load_newest_first() {
  let (_, store, _) = store_with(CATALOGUE).await;

  assert_eq!(titles(&store.songs()), vec!["Yesterday", "Black Dog", "Blackbird"]);
}

#[tokio::test]
async fn every_keyword_must_match() {
  let (gateway, store, _) = store_with(CATALOGUE).await;

  store.set_search_query("black BEATLES").await.unwrap();

  assert_eq!(titles(&store.songs()), vec!["Blackbird"]);
  assert_eq!(gateway.calls(), vec!["search_songs"]);
  assert_eq!(store.search_query(), "black BEATLES");
}

#[tokio::test]
async fn blank_query_lists_everything() {
  let (gateway, store, _) = store_with(CATALOGUE).await;

  store.set_search_query("   ").await.unwrap();

  assert_eq!(store.songs().len(), 3);
  assert_eq!(gateway.calls(), vec!["list_songs"]);
}

#[tokio::test]
async fn same_query_twice_gives_the_same_list() {
  let (_, store, _) = store_with(CATALOGUE).await;

  let first = store.fetch("the beatles").await.unwrap();
  let second = store.fetch("the beatles").await.unwrap();

  assert_eq!(first, second);
  assert_eq!(titles(&first), vec!["Yesterday", "Blackbird"]);
}

#[tokio::test]
async fn created_song_replaces_its_placeholder() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let form = SongFormData { title: "Help!".into(), artist: "The Beatles".into(), ..Default::default() };
  let gate = gateway.pause_next("create_song");

  let create = store.create_song(form);
  let observe = async {
    gate.entered.notified().await;
    let pending = store.songs();
    assert_eq!(pending[0].title, "Help!");
    gate.release.notify_one();
    pending[0].id
  };

  let (created, placeholder_id) = tokio::join!(create, observe);
  assert_eq!(created, Ok(true));

  let songs = store.songs();
  assert_eq!(titles(&songs), vec!["Help!", "Yesterday", "Black Dog", "Blackbird"]);
  assert_ne!(songs[0].id, placeholder_id);
}

#[tokio::test]
async fn placeholder_hidden_when_it_does_not_match_the_query() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  store.set_search_query("zeppelin").await.unwrap();
  let gate = gateway.pause_next("create_song");

  let form = SongFormData { title: "Help!".into(), artist: "The Beatles".into(), ..Default::default() };
  let create = store.create_song(form);
  let observe = async {
    gate.entered.notified().await;
    assert_eq!(titles(&store.songs()), vec!["Black Dog"]);
    gate.release.notify_one();
  };

  let (created, ()) = tokio::join!(create, observe);
  assert_eq!(created, Ok(true));
  assert_eq!(titles(&store.songs()), vec!["Black Dog"]);
  assert_eq!(gateway.stored_song_count(), 4);
}

#[tokio::test]
async fn failed_create_removes_the_placeholder() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let before = store.songs();
  gateway.fail_next("create_song", "JWT expired");

  let form = SongFormData { title: "Help!".into(), artist: "The Beatles".into(), ..Default::default() };
  let result = store.create_song(form).await;

  assert_eq!(result, Err(CoreError::Backend("JWT expired".into())));
  assert_eq!(store.songs(), before);
}

#[tokio::test]
async fn update_song_is_applied_and_confirmed() {
  let (_, store, _) = store_with(CATALOGUE).await;
  let id = store.songs()[0].id;

  let patch = SongPatch { title: Some("Yesterday (Remastered)".into()), ..Default::default() };
  assert_eq!(store.update_song(id, patch).await, Ok(true));

  assert_eq!(store.songs()[0].title, "Yesterday (Remastered)");
}

#[tokio::test]
async fn failed_update_falls_back_to_backend_state() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let before = store.songs();
  gateway.fail_next("update_song", "value too long");

  let patch = SongPatch { title: Some("x".repeat(500)), ..Default::default() };
  let result = store.update_song(before[0].id, patch).await;

  assert!(matches!(result, Err(CoreError::Backend(_))));
  assert_eq!(store.songs(), before);
}

#[tokio::test]
async fn failed_delete_puts_the_song_back_in_place() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let before = store.songs();
  gateway.fail_next("delete_song", "foreign key violation");

  let result = store.delete_song(before[1].id).await;

  assert!(matches!(result, Err(CoreError::Backend(_))));
  assert_eq!(store.songs(), before);
}

#[tokio::test]
async fn delete_song_removes_it() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let id = store.songs()[1].id;

  assert_eq!(store.delete_song(id).await, Ok(true));

  assert_eq!(titles(&store.songs()), vec!["Yesterday", "Blackbird"]);
  assert_eq!(gateway.stored_song_count(), 2);
}

#[tokio::test]
async fn results_for_an_outdated_query_are_dropped() {
  let (gateway, store, _) = store_with(CATALOGUE).await;
  let gate = gateway.pause_next("search_songs");

  let slow = store.set_search_query("beatles");
  let newer = async {
    gate.entered.notified().await;
    store.set_search_query("zeppelin").await.unwrap();
    gate.release.notify_one();
  };

  let (slow_result, ()) = tokio::join!(slow, newer);
  assert_eq!(slow_result, Ok(()));

  let state = store.state();
  assert_eq!(state.key, "zeppelin");
  assert_eq!(titles(&state.items), vec!["Black Dog"]);
}
