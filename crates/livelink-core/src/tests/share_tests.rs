use std::sync::Arc;

use chrono::NaiveDate;

use super::fake_gateway::FakeGateway;
use crate::errors::CoreError;
use crate::services::share::build_metadata;
use crate::services::{ShareLookup, ShareOptions, ShareRequest, ShareService};
use crate::validation::ValidationError;

/// Una banda con un live compartido que lleva `titles` en orden.
fn published(titles: &[&str]) -> (Arc<FakeGateway>, ShareService<FakeGateway>) {
  let gateway = FakeGateway::new();
  let band = gateway.seed_band("Kinoko");
  let live = gateway.seed_live(band.id, "Tour Final", NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(), Some("tourfinal"));
  // Sembrados desordenados a propósito.
  for (i, title) in titles.iter().enumerate().rev() {
    let song = gateway.seed_song(band.id, title, "Kinoko");
    gateway.seed_item(live.id, song.id, i as i32 + 1);
  }

  let service = ShareService::new(Arc::clone(&gateway), ShareOptions { public_base_url: "https://example.test/".into() });
  (gateway, service)
}

fn request(slug: &str) -> ShareRequest {
  ShareRequest { share_slug: slug.into(), ..Default::default() }
}

fn found(lookup: ShareLookup) -> crate::domain::ShareSnapshot {
  match lookup {
    ShareLookup::Found(snapshot) => *snapshot,
    ShareLookup::NotFound => panic!("expected a shared live"),
  }
}

#[tokio::test]
async fn snapshot_lists_songs_in_setlist_order() {
  let (_, service) = published(&["Opening", "Middle", "Closer"]);

  let snapshot = found(service.snapshot(&request("tourfinal")).await.unwrap());

  let titles: Vec<_> = snapshot.setlist.iter().map(|entry| entry.song.title.as_str()).collect();
  assert_eq!(titles, vec!["Opening", "Middle", "Closer"]);
  assert_eq!(snapshot.band.name, "Kinoko");
  assert_eq!(snapshot.live.title, "Tour Final");
  assert!(snapshot.metadata.is_none());
  assert!(snapshot.metrics.is_none());
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
  let (gateway, service) = published(&["Opening"]);

  let lookup = service.snapshot(&request("nope")).await.unwrap();

  assert_eq!(lookup, ShareLookup::NotFound);
  assert_eq!(gateway.call_count("list_setlist"), 0);
}

#[tokio::test]
async fn empty_or_malformed_slug_is_rejected_before_the_backend() {
  let (gateway, service) = published(&[]);

  assert_eq!(
    service.snapshot(&request("  ")).await,
    Err(CoreError::Validation(ValidationError::MissingField("share_slug")))
  );
  assert!(matches!(
    service.snapshot(&request("Tour Final")).await,
    Err(CoreError::Validation(ValidationError::InvalidSlug(_)))
  ));
  assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn backend_failure_is_an_error_not_a_miss() {
  let (gateway, service) = published(&["Opening"]);
  gateway.fail_next("find_shared_live", "upstream timeout");

  let result = service.snapshot(&request("tourfinal")).await;

  assert_eq!(result, Err(CoreError::Backend("upstream timeout".into())));
}

#[tokio::test]
async fn metadata_and_metrics_on_request() {
  let (_, service) = published(&["One", "Two", "Three", "Four", "Five"]);
  let req = ShareRequest { share_slug: "tourfinal".into(), include_metadata: true, include_metrics: true };

  let snapshot = found(service.snapshot(&req).await.unwrap());

  let metadata = snapshot.metadata.unwrap();
  assert_eq!(metadata.title, "Kinoko - Tour Final Setlist");
  assert_eq!(
    metadata.description,
    "Live at Zepp Shinjuku on 2030-05-01. 5 songs: One, Two, Three and 2 more"
  );
  assert_eq!(metadata.social_image, "https://example.test/api/social-image/tourfinal");

  let metrics = snapshot.metrics.unwrap();
  assert_eq!(metrics.song_count, 5);
  assert!(metrics.query_time_ms >= 0.0);
  assert_eq!((metrics.query_time_ms * 100.0).round() / 100.0, metrics.query_time_ms);
}

#[tokio::test]
async fn short_setlists_are_not_summarised() {
  let (gateway, _) = published(&["One", "Two"]);
  let service = ShareService::new(Arc::clone(&gateway), ShareOptions::default());

  let snapshot =
    found(service.snapshot(&ShareRequest { include_metadata: true, ..request("tourfinal") }).await.unwrap());

  let expected = build_metadata(&snapshot.band, &snapshot.live, &snapshot.setlist, "tourfinal", "https://livelink.app");
  assert_eq!(expected.description, "Live at Zepp Shinjuku on 2030-05-01. 2 songs: One, Two");
  assert_eq!(expected.social_image, "https://livelink.app/api/social-image/tourfinal");
  assert_eq!(snapshot.metadata, Some(expected));
}
