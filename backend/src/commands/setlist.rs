use livelink_core::domain::{Live, SetlistItem};

use crate::app::App;
use crate::cli::SetlistCommand;
use crate::commands::{lives, songs};
use crate::{output, resolve};

pub async fn run(app: &App, cmd: SetlistCommand, json: bool) -> anyhow::Result<()> {
  let live = match &cmd {
    SetlistCommand::Show { live }
    | SetlistCommand::Add { live, .. }
    | SetlistCommand::Remove { live, .. }
    | SetlistCommand::Order { live, .. }
    | SetlistCommand::Up { live, .. }
    | SetlistCommand::Down { live, .. }
    | SetlistCommand::Clear { live } => select(app, live).await?,
  };

  match cmd {
    SetlistCommand::Show { .. } => {}
    SetlistCommand::Add { song, .. } => {
      let song = songs::find(app, &song).await?;
      app.setlist.add_song(live.id, song.id).await?;
    }
    SetlistCommand::Remove { position, .. } => {
      let item = at(app, position)?;
      app.setlist.remove_song(item.id).await?;
    }
    SetlistCommand::Order { position, order_index, .. } => {
      let item = at(app, position)?;
      app.setlist.update_order(item.id, order_index).await?;
    }
    SetlistCommand::Up { position, .. } => {
      let item = at(app, position)?;
      if !app.setlist.move_up(item.id).await? {
        println!("already first");
      }
    }
    SetlistCommand::Down { position, .. } => {
      let item = at(app, position)?;
      if !app.setlist.move_down(item.id).await? {
        println!("already last");
      }
    }
    SetlistCommand::Clear { .. } => {
      app.setlist.clear_setlist(live.id).await?;
    }
  }

  output::setlist(&live, &app.setlist.items(), json)
}

async fn select(app: &App, input: &str) -> anyhow::Result<Live> {
  let live = lives::find(app, input).await?;
  app.setlist.set_current_live_id(Some(live.id)).await?;
  Ok(live)
}

fn at(app: &App, position: usize) -> anyhow::Result<SetlistItem> {
  let items = app.setlist.items();
  Ok(resolve::by_position(&items, position)?.clone())
}
