//! Generación de slugs públicos para compartir setlists.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::ports::ShareGateway;
use crate::validation::{MAX_SLUG_LEN, ValidationError};

pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const DEFAULT_SLUG_LEN: usize = 8;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Slug aleatorio de `length` caracteres en `[a-z0-9]`.
pub fn random_slug<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
  (0..length).map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRequest {
  /// Consultar al backend que el slug no esté en uso.
  pub check_uniqueness: bool,
  /// Slug que nunca debe devolverse (p. ej. el actual del live).
  pub exclude_slug: Option<String>,
  pub length: usize,
}

impl Default for SlugRequest {
  fn default() -> Self {
    SlugRequest { check_uniqueness: false, exclude_slug: None, length: DEFAULT_SLUG_LEN }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugOutcome {
  pub slug: String,
  /// Sólo presente cuando se pidió comprobar unicidad.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_unique: Option<bool>,
  /// `true` si el slug se entregó sin una comprobación concluyente.
  pub fallback_mode: bool,
}

pub struct SlugGenerator<G> {
  gateway: Arc<G>,
  max_attempts: usize,
  rng: Mutex<StdRng>,
}

impl<G: ShareGateway> SlugGenerator<G> {
  pub fn new(gateway: Arc<G>, max_attempts: usize) -> Self {
    Self { gateway, max_attempts, rng: Mutex::new(StdRng::from_os_rng()) }
  }

  /// Variante determinista para tests.
  pub fn with_seed(gateway: Arc<G>, max_attempts: usize, seed: u64) -> Self {
    Self { gateway, max_attempts, rng: Mutex::new(StdRng::seed_from_u64(seed)) }
  }

  pub fn next_slug(&self, length: usize) -> String {
    match self.rng.lock() {
      Ok(mut rng) => random_slug(&mut *rng, length),
      // Un mutex envenenado no invalida el generador: se usa el rng del hilo.
      Err(_) => random_slug(&mut rand::rng(), length),
    }
  }

  /// Genera un slug.
  ///
  /// - Sin comprobación: devuelve uno aleatorio.
  /// - Con comprobación: hasta `max_attempts` intentos, saltando `exclude_slug`.
  ///   Si la consulta al backend falla, devuelve un slug sin comprobar en modo
  ///   fallback. Si se agotan los intentos, devuelve uno nuevo marcado como no
  ///   único.
  pub async fn generate(&self, request: &SlugRequest) -> Result<SlugOutcome, CoreError> {
    if request.length == 0 || request.length > MAX_SLUG_LEN {
      return Err(ValidationError::InvalidSlugLength(request.length).into());
    }

    if !request.check_uniqueness {
      return Ok(SlugOutcome { slug: self.next_slug(request.length), is_unique: None, fallback_mode: false });
    }

    for attempt in 1..=self.max_attempts {
      let slug = self.next_slug(request.length);

      if request.exclude_slug.as_deref() == Some(slug.as_str()) {
        debug!(attempt, "generated the excluded slug, retrying");
        continue;
      }

      match self.gateway.share_slug_exists(&slug).await.into_data() {
        Ok(false) => return Ok(SlugOutcome { slug, is_unique: Some(true), fallback_mode: false }),
        Ok(true) => debug!(attempt, %slug, "slug already taken"),
        Err(err) => {
          warn!(error = %err, "slug uniqueness check failed, falling back to an unchecked slug");
          return Ok(SlugOutcome { slug, is_unique: Some(true), fallback_mode: true });
        }
      }
    }

    warn!(attempts = self.max_attempts, "no free slug found");
    Ok(SlugOutcome { slug: self.next_slug(request.length), is_unique: Some(false), fallback_mode: true })
  }
}
