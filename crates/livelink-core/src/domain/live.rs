use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BandId, LiveId};

/// Un evento en vivo de la banda.
///
/// Cuando `share_slug` está presente, el live es legible públicamente a través
/// del servicio de share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Live {
  pub id: LiveId,
  pub band_id: BandId,
  pub title: String,
  pub venue: String,
  pub date: NaiveDate,
  pub description: Option<String>,
  pub ticket_url: Option<String>,
  pub is_upcoming: bool,
  pub share_slug: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Datos de formulario para crear un live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveFormData {
  pub title: String,
  pub date: NaiveDate,
  pub venue: String,
  pub description: Option<String>,
  pub ticket_url: Option<String>,
  /// Si no se indica, el backend lo considera próximo (`true`).
  pub is_upcoming: Option<bool>,
  pub share_slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LivePatch {
  pub title: Option<String>,
  pub date: Option<NaiveDate>,
  pub venue: Option<String>,
  pub description: Option<String>,
  pub ticket_url: Option<String>,
  pub is_upcoming: Option<bool>,
  pub share_slug: Option<String>,
}

impl LivePatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.date.is_none()
      && self.venue.is_none()
      && self.description.is_none()
      && self.ticket_url.is_none()
      && self.is_upcoming.is_none()
      && self.share_slug.is_none()
  }

  pub fn apply_to(&self, live: &mut Live) {
    if let Some(title) = &self.title {
      live.title = title.clone();
    }
    if let Some(date) = self.date {
      live.date = date;
    }
    if let Some(venue) = &self.venue {
      live.venue = venue.clone();
    }
    if let Some(description) = &self.description {
      live.description = Some(description.clone());
    }
    if let Some(url) = &self.ticket_url {
      live.ticket_url = Some(url.clone());
    }
    if let Some(upcoming) = self.is_upcoming {
      live.is_upcoming = upcoming;
    }
    if let Some(slug) = &self.share_slug {
      live.share_slug = Some(slug.clone());
    }
  }
}
