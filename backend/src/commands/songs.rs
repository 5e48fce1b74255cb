use livelink_core::domain::{Song, SongFormData, SongPatch};

use crate::app::App;
use crate::cli::{SongEdits, SongFields, SongsCommand};
use crate::{output, resolve};

pub async fn run(app: &App, cmd: SongsCommand, json: bool) -> anyhow::Result<()> {
  match cmd {
    SongsCommand::List { query } => {
      app.songs.set_search_query(query.join(" ")).await?;
      output::songs(&app.songs.songs(), json)
    }
    SongsCommand::Add(fields) => {
      let form = form(fields);
      form.validate()?;
      app.songs.create_song(form).await?;
      output::songs(&app.songs.songs(), json)
    }
    SongsCommand::Edit { song, fields } => {
      let patch = patch(fields);
      patch.validate()?;
      let id = find(app, &song).await?.id;
      app.songs.update_song(id, patch).await?;
      output::songs(&app.songs.songs(), json)
    }
    SongsCommand::Remove { song } => {
      let id = find(app, &song).await?.id;
      app.songs.delete_song(id).await?;
      output::songs(&app.songs.songs(), json)
    }
  }
}

/// Looks the song up among all of the band's songs.
pub async fn find(app: &App, input: &str) -> anyhow::Result<Song> {
  app.songs.set_search_query("").await?;
  let songs = app.songs.songs();
  Ok(resolve::by_id_prefix(&songs, input, "song", |song| song.id.to_string())?.clone())
}

fn form(fields: SongFields) -> SongFormData {
  SongFormData { title: fields.title, artist: fields.artist, youtube_url: fields.youtube, spotify_url: fields.spotify }
}

fn patch(fields: SongEdits) -> SongPatch {
  SongPatch { title: fields.title, artist: fields.artist, youtube_url: fields.youtube, spotify_url: fields.spotify }
}
