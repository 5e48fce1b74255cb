use std::sync::Arc;

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::fake_gateway::FakeGateway;
use crate::errors::CoreError;
use crate::services::slug::{SLUG_ALPHABET, random_slug};
use crate::services::{SlugGenerator, SlugOutcome, SlugRequest};
use crate::validation::ValidationError;

fn checked(length: usize) -> SlugRequest {
  SlugRequest { check_uniqueness: true, exclude_slug: None, length }
}

fn is_slug(slug: &str, length: usize) -> bool {
  slug.len() == length && slug.bytes().all(|b| SLUG_ALPHABET.contains(&b))
}

#[test]
fn random_slug_uses_lowercase_alphanumerics() {
  let mut rng = StdRng::seed_from_u64(7);
  for length in [1, 8, 64] {
    assert!(is_slug(&random_slug(&mut rng, length), length));
  }
}

#[tokio::test]
async fn unchecked_request_never_touches_the_backend() {
  let gateway = FakeGateway::new();
  let generator = SlugGenerator::new(Arc::clone(&gateway), 10);

  let outcome = generator.generate(&SlugRequest::default()).await.unwrap();

  assert!(is_slug(&outcome.slug, 8));
  assert_eq!(outcome.is_unique, None);
  assert!(!outcome.fallback_mode);
  assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn checked_request_returns_a_free_slug() {
  let gateway = FakeGateway::new();
  let generator = SlugGenerator::new(Arc::clone(&gateway), 10);

  let outcome = generator.generate(&checked(12)).await.unwrap();

  assert!(is_slug(&outcome.slug, 12));
  assert_eq!(outcome.is_unique, Some(true));
  assert!(!outcome.fallback_mode);
  assert_eq!(gateway.call_count("share_slug_exists"), 1);
}

#[tokio::test]
async fn taken_slug_is_retried() {
  let gateway = FakeGateway::new();
  let band = gateway.seed_band("Kinoko");
  // Misma semilla: el primer slug del generador es justo este.
  let first = random_slug(&mut StdRng::seed_from_u64(42), 8);
  gateway.seed_live(band.id, "Taken", NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), Some(first.as_str()));
  let generator = SlugGenerator::with_seed(Arc::clone(&gateway), 10, 42);

  let outcome = generator.generate(&checked(8)).await.unwrap();

  assert_ne!(outcome.slug, first);
  assert_eq!(outcome.is_unique, Some(true));
  assert_eq!(gateway.call_count("share_slug_exists"), 2);
}

#[tokio::test]
async fn excluded_slug_is_skipped_without_asking() {
  let gateway = FakeGateway::new();
  let first = random_slug(&mut StdRng::seed_from_u64(3), 8);
  let generator = SlugGenerator::with_seed(Arc::clone(&gateway), 10, 3);

  let request = SlugRequest { exclude_slug: Some(first.clone()), ..checked(8) };
  let outcome = generator.generate(&request).await.unwrap();

  assert_ne!(outcome.slug, first);
  assert_eq!(gateway.call_count("share_slug_exists"), 1);
}

#[tokio::test]
async fn exhausted_attempts_fall_back_to_a_non_unique_slug() {
  let gateway = FakeGateway::new();
  gateway.claim_every_slug();
  let generator = SlugGenerator::new(Arc::clone(&gateway), 4);

  let outcome = generator.generate(&checked(8)).await.unwrap();

  assert!(is_slug(&outcome.slug, 8));
  assert_eq!(outcome.is_unique, Some(false));
  assert!(outcome.fallback_mode);
  assert_eq!(gateway.call_count("share_slug_exists"), 4);
}

#[tokio::test]
async fn failing_check_falls_back_immediately() {
  let gateway = FakeGateway::new();
  gateway.fail_next("share_slug_exists", "relation \"lives\" does not exist");
  let generator = SlugGenerator::new(Arc::clone(&gateway), 10);

  let SlugOutcome { slug, fallback_mode, .. } = generator.generate(&checked(8)).await.unwrap();

  assert!(is_slug(&slug, 8));
  assert!(fallback_mode);
  assert_eq!(gateway.call_count("share_slug_exists"), 1);
}

#[tokio::test]
async fn length_out_of_range_is_rejected() {
  let generator = SlugGenerator::new(FakeGateway::new(), 10);

  for length in [0, 65] {
    let request = SlugRequest { length, ..Default::default() };
    assert_eq!(
      generator.generate(&request).await,
      Err(CoreError::Validation(ValidationError::InvalidSlugLength(length)))
    );
  }
}
