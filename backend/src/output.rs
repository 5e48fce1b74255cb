//! Human-readable and JSON rendering of command results.

use serde::Serialize;

use livelink_core::domain::{Live, SetlistItem, ShareSnapshot, Song};
use livelink_core::services::SlugOutcome;

/// Ids are shown shortened; any unique prefix is accepted back.
const SHORT_ID: usize = 8;

fn short(id: impl ToString) -> String {
  let mut id = id.to_string();
  id.truncate(SHORT_ID);
  id
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub fn song_line(song: &Song) -> String {
  let mut line = format!("{}  {} - {}", short(song.id), song.title, song.artist);
  if song.youtube_url.is_some() {
    line.push_str("  [yt]");
  }
  if song.spotify_url.is_some() {
    line.push_str("  [spotify]");
  }
  line
}

pub fn live_line(live: &Live) -> String {
  let mut line = format!("{}  {}  {} @ {}", short(live.id), live.date.format("%Y-%m-%d"), live.title, live.venue);
  if live.is_upcoming {
    line.push_str("  (upcoming)");
  }
  if let Some(slug) = &live.share_slug {
    line.push_str(&format!("  /share/{slug}"));
  }
  line
}

/// `position. title - artist  #order_index`
pub fn setlist_lines(items: &[SetlistItem]) -> Vec<String> {
  items
    .iter()
    .enumerate()
    .map(|(i, item)| {
      let artist = item.song.as_ref().map(|song| song.artist.as_str()).unwrap_or_default();
      format!("{:>3}. {} - {}  #{}", i + 1, item.title(), artist, item.order_index)
    })
    .collect()
}

pub fn songs(list: &[Song], as_json: bool) -> anyhow::Result<()> {
  if as_json {
    return json(list);
  }
  if list.is_empty() {
    println!("no songs");
  }
  list.iter().for_each(|song| println!("{}", song_line(song)));
  Ok(())
}

pub fn lives(list: &[Live], as_json: bool) -> anyhow::Result<()> {
  if as_json {
    return json(list);
  }
  if list.is_empty() {
    println!("no lives");
  }
  list.iter().for_each(|live| println!("{}", live_line(live)));
  Ok(())
}

pub fn setlist(live: &Live, items: &[SetlistItem], as_json: bool) -> anyhow::Result<()> {
  if as_json {
    return json(items);
  }
  println!("{}", live_line(live));
  if items.is_empty() {
    println!("  (empty setlist)");
  }
  setlist_lines(items).iter().for_each(|line| println!("{line}"));
  Ok(())
}

pub fn share(snapshot: &ShareSnapshot, as_json: bool) -> anyhow::Result<()> {
  if as_json {
    return json(snapshot);
  }
  println!("{} - {}", snapshot.band.name, snapshot.live.title);
  println!("{} @ {}", snapshot.live.date.format("%Y-%m-%d"), snapshot.live.venue);
  for entry in &snapshot.setlist {
    println!("{:>3}. {} - {}", entry.order_index, entry.song.title, entry.song.artist);
  }
  if let Some(metadata) = &snapshot.metadata {
    println!();
    println!("{}", metadata.title);
    println!("{}", metadata.description);
    println!("{}", metadata.social_image);
  }
  if let Some(metrics) = &snapshot.metrics {
    println!("{} songs in {:.2} ms", metrics.song_count, metrics.query_time_ms);
  }
  Ok(())
}

pub fn slug(outcome: &SlugOutcome, as_json: bool) -> anyhow::Result<()> {
  if as_json {
    return json(outcome);
  }
  let note = match (outcome.is_unique, outcome.fallback_mode) {
    (_, false) => "",
    (Some(false), true) => "  (no free slug found, may collide)",
    (_, true) => "  (uniqueness not verified)",
  };
  println!("{}{note}", outcome.slug);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use livelink_core::domain::{LiveId, SongId};

  #[test]
  fn setlist_lines_number_by_position_not_index() {
    let live = LiveId::new();
    let items = vec![SetlistItem::provisional(live, SongId::new(), 4), SetlistItem::provisional(live, SongId::new(), 9)];

    let lines = setlist_lines(&items);

    assert!(lines[0].starts_with("  1. "));
    assert!(lines[1].starts_with("  2. "));
    assert!(lines[1].ends_with("#9"));
  }

  #[test]
  fn short_ids_are_prefixes() {
    let id = SongId::new();
    assert!(id.to_string().starts_with(&short(id)));
    assert_eq!(short(id).len(), SHORT_ID);
  }
}
