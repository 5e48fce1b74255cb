mod lives;
mod setlist;
mod share;
mod songs;

use tracing::info;

use crate::app::App;
use crate::cli::Command;

pub async fn dispatch(app: &App, command: Command, json: bool) -> anyhow::Result<()> {
  match command {
    Command::Init => init(app),
    Command::Songs(cmd) => songs::run(app, cmd, json).await,
    Command::Lives(cmd) => lives::run(app, cmd, json).await,
    Command::Setlist(cmd) => setlist::run(app, cmd, json).await,
    Command::Share(args) => share::show(app, args, json).await,
    Command::Slug(args) => share::slug(app, args, json).await,
  }
}

/// Opening the app already created the database and seeded the band.
fn init(app: &App) -> anyhow::Result<()> {
  info!(band = %app.band.id, "workspace initialized");
  println!("config:   {}", app.paths.config_file().display());
  println!("database: {}", app.config.storage.database_url(&app.paths));
  println!("band:     {} ({})", app.band.name, app.band.id);
  Ok(())
}
