//! Turns what the user typed (an id, or the start of one) into an entity.

use anyhow::{anyhow, bail};

/// Exact id, or the only id starting with `input` (case-insensitive).
pub fn by_id_prefix<'a, T>(items: &'a [T], input: &str, kind: &str, id_of: impl Fn(&T) -> String) -> anyhow::Result<&'a T> {
  let needle = input.trim().to_ascii_lowercase();
  if needle.is_empty() {
    bail!("empty {kind} id");
  }

  if let Some(exact) = items.iter().find(|item| id_of(item) == needle) {
    return Ok(exact);
  }

  let mut matches = items.iter().filter(|item| id_of(item).starts_with(&needle));
  match (matches.next(), matches.next()) {
    (Some(found), None) => Ok(found),
    (None, _) => Err(anyhow!("no {kind} matches {input:?}")),
    (Some(_), Some(_)) => Err(anyhow!("{input:?} matches more than one {kind}, type more of the id")),
  }
}

/// 1-based position as printed by `setlist show`.
pub fn by_position<T>(items: &[T], position: usize) -> anyhow::Result<&T> {
  position
    .checked_sub(1)
    .and_then(|index| items.get(index))
    .ok_or_else(|| anyhow!("no setlist item at position {position} (setlist has {})", items.len()))
}
