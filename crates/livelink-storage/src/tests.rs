//! Comportamiento del gateway contra una base en memoria.

use std::sync::Arc;

use chrono::NaiveDate;

use livelink_core::domain::{BandId, Live, LiveFormData, LivePatch, Song, SongFormData, SongPatch};
use livelink_core::ports::{LiveGateway, SetlistGateway, ShareGateway, SongGateway};
use livelink_core::stores::{SetlistStore, SongsStore};

use crate::SqliteGateway;

fn gateway() -> (SqliteGateway, BandId) {
  let gateway = SqliteGateway::open_in_memory().unwrap();
  let band = gateway.ensure_band(BandId::new(), "Kinoko").unwrap();
  (gateway, band.id)
}

async fn song(gateway: &SqliteGateway, band_id: BandId, title: &str, artist: &str) -> Song {
  let form = SongFormData { title: title.into(), artist: artist.into(), ..Default::default() };
  gateway.create_song(band_id, &form).await.into_data().unwrap()
}

async fn live(gateway: &SqliteGateway, band_id: BandId, title: &str, date: (u32, u32), slug: Option<&str>) -> Live {
  let form = LiveFormData {
    title: title.into(),
    date: NaiveDate::from_ymd_opt(2030, date.0, date.1).unwrap(),
    venue: "Shibuya O-East".into(),
    description: None,
    ticket_url: None,
    is_upcoming: None,
    share_slug: slug.map(str::to_string),
  };
  gateway.create_live(band_id, &form).await.into_data().unwrap()
}

#[test]
fn ensure_band_is_idempotent() {
  let gateway = SqliteGateway::open_in_memory().unwrap();
  let id = BandId::new();

  let first = gateway.ensure_band(id, "Kinoko").unwrap();
  let second = gateway.ensure_band(id, "Renamed").unwrap();

  assert_eq!(first, second);
  assert_eq!(second.name, "Kinoko");
}

#[tokio::test]
async fn songs_come_back_newest_first() {
  let (gateway, band) = gateway();
  song(&gateway, band, "Blackbird", "The Beatles").await;
  song(&gateway, band, "Black Dog", "Led Zeppelin").await;

  let songs = gateway.list_songs(band).await.into_list().unwrap();

  let titles: Vec<_> = songs.iter().map(|s| s.title.as_str()).collect();
  assert_eq!(titles, vec!["Black Dog", "Blackbird"]);
}

#[tokio::test]
async fn search_matches_title_or_artist_ignoring_case() {
  let (gateway, band) = gateway();
  song(&gateway, band, "Blackbird", "The Beatles").await;
  song(&gateway, band, "Whole Lotta Love", "Led Zeppelin").await;
  song(&gateway, band, "100% Pure", "Someone").await;

  let by_artist = gateway.search_songs(band, "ZEPPELIN").await.into_list().unwrap();
  assert_eq!(by_artist.len(), 1);
  assert_eq!(by_artist[0].title, "Whole Lotta Love");

  // `%` es literal, no un comodín.
  let literal = gateway.search_songs(band, "0%").await.into_list().unwrap();
  assert_eq!(literal.len(), 1);
  assert_eq!(literal[0].title, "100% Pure");
}

#[tokio::test]
async fn search_ignores_case_beyond_ascii() {
  let (gateway, band) = gateway();
  song(&gateway, band, "Привет", "Ärzte").await;
  song(&gateway, band, "Blackbird", "The Beatles").await;

  let found = gateway.search_songs(band, "привет").await.into_list().unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].title, "Привет");

  let store = SongsStore::new(Arc::new(gateway), band);
  for query in ["привет", "ärzte", "ПРИВЕТ", "ÄRZTE привет"] {
    store.set_search_query(query).await.unwrap();
    let titles: Vec<_> = store.songs().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Привет"], "query {query:?}");
  }
}

#[tokio::test]
async fn update_song_touches_only_patched_fields() {
  let (gateway, band) = gateway();
  let original = song(&gateway, band, "Blackbird", "The Beatles").await;

  let patch = SongPatch { spotify_url: Some("https://open.spotify.com/track/1".into()), ..Default::default() };
  let updated = gateway.update_song(original.id, &patch).await.into_data().unwrap();

  assert_eq!(updated.title, "Blackbird");
  assert_eq!(updated.spotify_url.as_deref(), Some("https://open.spotify.com/track/1"));
  assert!(updated.updated_at >= original.updated_at);
}

#[tokio::test]
async fn updating_a_missing_song_is_an_error() {
  let (gateway, _) = gateway();

  let patch = SongPatch { title: Some("Ghost".into()), ..Default::default() };
  let res = gateway.update_song(livelink_core::domain::SongId::new(), &patch).await;

  assert!(!res.is_ok());
}

#[tokio::test]
async fn duplicate_order_index_is_rejected() {
  let (gateway, band) = gateway();
  let night = live(&gateway, band, "Night", (5, 1), None).await;
  let a = song(&gateway, band, "A", "x").await;
  let b = song(&gateway, band, "B", "x").await;

  gateway.add_setlist_song(night.id, a.id, 1).await.into_data().unwrap();
  let clash = gateway.add_setlist_song(night.id, b.id, 1).await;

  let message = clash.error.unwrap();
  assert!(message.contains("UNIQUE"), "{message}");
  assert_eq!(gateway.list_setlist(night.id).await.into_list().unwrap().len(), 1);
}

#[tokio::test]
async fn setlist_rows_carry_their_song() {
  let (gateway, band) = gateway();
  let night = live(&gateway, band, "Night", (5, 1), None).await;
  let a = song(&gateway, band, "A", "x").await;
  let b = song(&gateway, band, "B", "y").await;
  gateway.add_setlist_song(night.id, b.id, 2).await.into_data().unwrap();
  gateway.add_setlist_song(night.id, a.id, 1).await.into_data().unwrap();

  let items = gateway.list_setlist(night.id).await.into_list().unwrap();

  let titles: Vec<_> = items.iter().map(|item| item.title()).collect();
  assert_eq!(titles, vec!["A", "B"]);
  assert_eq!(items[1].song.as_ref().unwrap().artist, "y");
}

#[tokio::test]
async fn deleting_a_song_or_live_cascades() {
  let (gateway, band) = gateway();
  let night = live(&gateway, band, "Night", (5, 1), None).await;
  let a = song(&gateway, band, "A", "x").await;
  let b = song(&gateway, band, "B", "x").await;
  gateway.add_setlist_song(night.id, a.id, 1).await.into_data().unwrap();
  gateway.add_setlist_song(night.id, b.id, 2).await.into_data().unwrap();

  gateway.delete_song(a.id).await.into_unit().unwrap();
  let items = gateway.list_setlist(night.id).await.into_list().unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].song_id, b.id);

  gateway.delete_live(night.id).await.into_unit().unwrap();
  assert!(gateway.list_setlist(night.id).await.into_list().unwrap().is_empty());
  assert_eq!(gateway.list_songs(band).await.into_list().unwrap().len(), 1);
}

#[tokio::test]
async fn share_slug_lookup() {
  let (gateway, band) = gateway();
  let night = live(&gateway, band, "Night", (5, 1), Some("night-2030")).await;

  let shared = gateway.find_shared_live("night-2030").await.into_data().unwrap().unwrap();
  assert_eq!(shared.live.id, night.id);
  assert_eq!(shared.band.name, "Kinoko");

  assert_eq!(gateway.find_shared_live("missing").await.into_data().unwrap(), None);
  assert!(gateway.share_slug_exists("night-2030").await.into_data().unwrap());
  assert!(!gateway.share_slug_exists("missing").await.into_data().unwrap());
}

#[tokio::test]
async fn share_slug_is_unique() {
  let (gateway, band) = gateway();
  live(&gateway, band, "First", (5, 1), Some("same")).await;

  let form = LiveFormData {
    title: "Second".into(),
    date: NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
    venue: "Elsewhere".into(),
    description: None,
    ticket_url: None,
    is_upcoming: Some(false),
    share_slug: Some("same".into()),
  };
  assert!(!gateway.create_live(band, &form).await.is_ok());
}

#[tokio::test]
async fn lives_sorted_by_date_and_patchable() {
  let (gateway, band) = gateway();
  let spring = live(&gateway, band, "Spring", (3, 1), None).await;
  live(&gateway, band, "Summer", (7, 1), None).await;

  let patch = LivePatch { date: Some(NaiveDate::from_ymd_opt(2030, 12, 1).unwrap()), ..Default::default() };
  gateway.update_live(spring.id, &patch).await.into_data().unwrap();

  let lives = gateway.list_lives(band).await.into_list().unwrap();
  let titles: Vec<_> = lives.iter().map(|l| l.title.as_str()).collect();
  assert_eq!(titles, vec!["Spring", "Summer"]);
}

#[tokio::test]
async fn store_moves_survive_the_unique_constraint() {
  let (gateway, band) = gateway();
  let gateway = Arc::new(gateway);
  let night = live(&gateway, band, "Night", (5, 1), None).await;
  let mut songs = Vec::new();
  for title in ["A", "B", "C"] {
    songs.push(song(&gateway, band, title, "x").await);
  }

  let store = SetlistStore::new(Arc::clone(&gateway));
  store.set_current_live_id(Some(night.id)).await.unwrap();
  for s in &songs {
    store.add_song(night.id, s.id).await.unwrap();
  }

  let last = store.items()[2].id;
  assert!(store.move_up(last).await.unwrap());
  let first = store.items()[0].id;
  assert!(!store.move_up(first).await.unwrap());

  let items = gateway.list_setlist(night.id).await.into_list().unwrap();
  let titles: Vec<_> = items.iter().map(|item| item.title()).collect();
  assert_eq!(titles, vec!["A", "C", "B"]);
  assert_eq!(items.iter().map(|item| item.order_index).collect::<Vec<_>>(), vec![1, 2, 3]);

  assert!(store.clear_setlist(night.id).await.unwrap());
  assert!(gateway.list_setlist(night.id).await.into_list().unwrap().is_empty());
}
