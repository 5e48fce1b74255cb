//! Vista pública de un setlist, resuelta por `share_slug`.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::setlist::sort_by_order;
use crate::domain::{Band, Live, ShareEntry, ShareMetadata, ShareMetrics, ShareSnapshot, SharedLive};
use crate::errors::CoreError;
use crate::ports::{SetlistGateway, ShareGateway};
use crate::validation::{ValidationError, validate_slug};

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://livelink.app";

/// Cuántos títulos se citan en la descripción antes de resumir el resto.
const PREVIEW_TITLES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
  pub share_slug: String,
  pub include_metadata: bool,
  pub include_metrics: bool,
}

/// Un slug desconocido no es un error: es un estado "no encontrado" visible.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareLookup {
  Found(Box<ShareSnapshot>),
  NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOptions {
  pub public_base_url: String,
}

impl Default for ShareOptions {
  fn default() -> Self {
    ShareOptions { public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string() }
  }
}

pub fn build_metadata(band: &Band, live: &Live, setlist: &[ShareEntry], slug: &str, base_url: &str) -> ShareMetadata {
  let song_count = setlist.len();
  let preview: Vec<&str> = setlist.iter().take(PREVIEW_TITLES).map(|entry| entry.song.title.as_str()).collect();
  let more = if song_count > PREVIEW_TITLES { format!(" and {} more", song_count - PREVIEW_TITLES) } else { String::new() };

  ShareMetadata {
    title: format!("{} - {} Setlist", band.name, live.title),
    description: format!(
      "Live at {} on {}. {} songs: {}{}",
      live.venue,
      live.date.format("%Y-%m-%d"),
      song_count,
      preview.join(", "),
      more
    ),
    social_image: format!("{}/api/social-image/{}", base_url.trim_end_matches('/'), slug),
  }
}

pub struct ShareService<G> {
  gateway: Arc<G>,
  options: ShareOptions,
}

impl<G> ShareService<G>
where
  G: ShareGateway + SetlistGateway,
{
  pub fn new(gateway: Arc<G>, options: ShareOptions) -> Self {
    Self { gateway, options }
  }

  pub async fn snapshot(&self, request: &ShareRequest) -> Result<ShareLookup, CoreError> {
    let started = Instant::now();
    let slug = request.share_slug.trim();

    if slug.is_empty() {
      return Err(ValidationError::MissingField("share_slug").into());
    }
    validate_slug(slug)?;

    let Some(SharedLive { live, band }) = self.gateway.find_shared_live(slug).await.into_data()? else {
      debug!(%slug, "no live shared under this slug");
      return Ok(ShareLookup::NotFound);
    };

    let mut items = self.gateway.list_setlist(live.id).await.into_list()?;
    sort_by_order(&mut items);

    let setlist: Vec<ShareEntry> = items
      .into_iter()
      .filter_map(|item| match item.song {
        Some(song) => Some(ShareEntry { id: item.id, order_index: item.order_index, song }),
        None => {
          warn!(item = %item.id, "setlist item without song data, skipping");
          None
        }
      })
      .collect();

    let metadata =
      request.include_metadata.then(|| build_metadata(&band, &live, &setlist, slug, &self.options.public_base_url));

    let metrics = request.include_metrics.then(|| {
      let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
      ShareMetrics { query_time_ms: (elapsed_ms * 100.0).round() / 100.0, song_count: setlist.len() }
    });

    Ok(ShareLookup::Found(Box::new(ShareSnapshot { live, band, setlist, metadata, metrics })))
  }
}
