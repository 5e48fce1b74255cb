//! Validación de formularios del lado cliente.
//!
//! Un `ValidationError` bloquea el envío: los stores sólo reciben datos ya
//! validados.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{LiveFormData, LivePatch, SongFormData, SongPatch};

pub const MAX_SLUG_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("{field} is not a valid URL: {value}")]
  InvalidUrl { field: &'static str, value: String },

  #[error("date {0} is in the past")]
  DateInPast(NaiveDate),

  #[error("invalid share slug: {0:?}")]
  InvalidSlug(String),

  #[error("slug length must be between 1 and 64, got {0}")]
  InvalidSlugLength(usize),

  #[error("nothing to update")]
  EmptyPatch,
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::MissingField(field));
  }
  Ok(())
}

fn check_url(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
  let Some(value) = value else {
    return Ok(());
  };

  if is_valid_url(value) {
    Ok(())
  } else {
    Err(ValidationError::InvalidUrl { field, value: value.to_string() })
  }
}

/// URL absoluta `http`/`https` con host.
pub fn is_valid_url(value: &str) -> bool {
  let rest = match value.split_once("://") {
    Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => rest,
    _ => return false,
  };

  let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
  !host.is_empty() && !host.contains(char::is_whitespace)
}

/// `[a-z0-9-]`, 1..=64 caracteres, sin guion al principio ni al final.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
  if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
    return Err(ValidationError::InvalidSlugLength(slug.len()));
  }

  let valid_chars = slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
  if !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
    return Err(ValidationError::InvalidSlug(slug.to_string()));
  }

  Ok(())
}

impl SongFormData {
  pub fn validate(&self) -> Result<(), ValidationError> {
    require("title", &self.title)?;
    require("artist", &self.artist)?;
    check_url("youtube_url", self.youtube_url.as_deref())?;
    check_url("spotify_url", self.spotify_url.as_deref())
  }
}

impl SongPatch {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.is_empty() {
      return Err(ValidationError::EmptyPatch);
    }
    if let Some(title) = &self.title {
      require("title", title)?;
    }
    if let Some(artist) = &self.artist {
      require("artist", artist)?;
    }
    check_url("youtube_url", self.youtube_url.as_deref())?;
    check_url("spotify_url", self.spotify_url.as_deref())
  }
}

impl LiveFormData {
  /// `today` se inyecta para que la regla "un live próximo no puede estar en el
  /// pasado" sea testeable.
  pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
    require("title", &self.title)?;
    require("venue", &self.venue)?;

    if self.is_upcoming.unwrap_or(true) && self.date < today {
      return Err(ValidationError::DateInPast(self.date));
    }

    check_url("ticket_url", self.ticket_url.as_deref())?;

    if let Some(slug) = &self.share_slug {
      validate_slug(slug)?;
    }

    Ok(())
  }
}

impl LivePatch {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.is_empty() {
      return Err(ValidationError::EmptyPatch);
    }
    if let Some(title) = &self.title {
      require("title", title)?;
    }
    if let Some(venue) = &self.venue {
      require("venue", venue)?;
    }
    check_url("ticket_url", self.ticket_url.as_deref())?;
    if let Some(slug) = &self.share_slug {
      validate_slug(slug)?;
    }
    Ok(())
  }
}
