use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "livelink", author, version, about, long_about = None)]
pub struct Cli {
  /// Database file, overriding `[storage] db_path`.
  #[arg(long, global = true)]
  pub database: Option<PathBuf>,

  /// Print results as JSON.
  #[arg(long, global = true)]
  pub json: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Write the default config and create the database.
  Init,

  /// Manage the band's songs.
  #[command(subcommand)]
  Songs(SongsCommand),

  /// Manage live events.
  #[command(subcommand)]
  Lives(LivesCommand),

  /// Edit the setlist of a live.
  #[command(subcommand)]
  Setlist(SetlistCommand),

  /// Show the public view of a shared live.
  Share(ShareArgs),

  /// Generate a share slug.
  Slug(SlugArgs),
}

#[derive(Debug, Subcommand)]
pub enum SongsCommand {
  /// List songs, optionally filtered by keywords (all must match).
  #[command(visible_alias = "ls")]
  List { query: Vec<String> },

  Add(SongFields),

  Edit {
    /// Song id or unique id prefix.
    song: String,
    #[command(flatten)]
    fields: SongEdits,
  },

  #[command(visible_alias = "rm")]
  Remove { song: String },
}

#[derive(Debug, Args)]
pub struct SongFields {
  #[arg(long)]
  pub title: String,
  #[arg(long)]
  pub artist: String,
  #[arg(long)]
  pub youtube: Option<String>,
  #[arg(long)]
  pub spotify: Option<String>,
}

#[derive(Debug, Args)]
pub struct SongEdits {
  #[arg(long)]
  pub title: Option<String>,
  #[arg(long)]
  pub artist: Option<String>,
  #[arg(long)]
  pub youtube: Option<String>,
  #[arg(long)]
  pub spotify: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum LivesCommand {
  #[command(visible_alias = "ls")]
  List {
    /// Only lives still flagged upcoming, soonest first.
    #[arg(long)]
    upcoming: bool,
  },

  Add(LiveFields),

  Edit {
    /// Live id or unique id prefix.
    live: String,
    #[command(flatten)]
    fields: LiveEdits,
  },

  #[command(visible_alias = "rm")]
  Remove { live: String },
}

#[derive(Debug, Args)]
pub struct LiveFields {
  #[arg(long)]
  pub title: String,
  #[arg(long)]
  pub venue: String,
  /// `YYYY-MM-DD`.
  #[arg(long)]
  pub date: NaiveDate,
  #[arg(long)]
  pub description: Option<String>,
  #[arg(long)]
  pub ticket_url: Option<String>,
  /// Record a live that already happened.
  #[arg(long)]
  pub past: bool,
  /// Publish under this slug.
  #[arg(long, conflicts_with = "share")]
  pub slug: Option<String>,
  /// Publish under a freshly generated slug.
  #[arg(long)]
  pub share: bool,
}

#[derive(Debug, Args)]
pub struct LiveEdits {
  #[arg(long)]
  pub title: Option<String>,
  #[arg(long)]
  pub venue: Option<String>,
  #[arg(long)]
  pub date: Option<NaiveDate>,
  #[arg(long)]
  pub description: Option<String>,
  #[arg(long)]
  pub ticket_url: Option<String>,
  #[arg(long)]
  pub upcoming: Option<bool>,
  #[arg(long, conflicts_with = "share")]
  pub slug: Option<String>,
  /// Publish under a freshly generated slug (replacing the current one).
  #[arg(long)]
  pub share: bool,
}

#[derive(Debug, Subcommand)]
pub enum SetlistCommand {
  Show { live: String },

  /// Append a song at the end.
  Add { live: String, song: String },

  /// Remove the item at `position` (1-based, as shown).
  #[command(visible_alias = "rm")]
  Remove { live: String, position: usize },

  /// Set the raw order index of the item at `position`.
  Order { live: String, position: usize, order_index: i32 },

  Up { live: String, position: usize },

  Down { live: String, position: usize },

  Clear { live: String },
}

#[derive(Debug, Args)]
pub struct ShareArgs {
  pub slug: String,
  #[arg(long)]
  pub metadata: bool,
  #[arg(long)]
  pub metrics: bool,
}

#[derive(Debug, Args)]
pub struct SlugArgs {
  /// Make sure no live uses it yet.
  #[arg(long)]
  pub check: bool,
  #[arg(long)]
  pub exclude: Option<String>,
  /// Defaults to `[share] slug_length`.
  #[arg(long)]
  pub length: Option<usize>,
}
