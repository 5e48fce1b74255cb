use livelink_core::domain::{Live, LiveFormData, LivePatch};
use livelink_core::services::SlugRequest;
use tracing::info;

use crate::app::App;
use crate::cli::{LiveEdits, LiveFields, LivesCommand};
use crate::{output, resolve};

pub async fn run(app: &App, cmd: LivesCommand, json: bool) -> anyhow::Result<()> {
  match cmd {
    LivesCommand::List { upcoming } => {
      app.lives.refresh().await?;
      let list = if upcoming { app.lives.upcoming() } else { app.lives.lives() };
      output::lives(&list, json)
    }
    LivesCommand::Add(fields) => {
      let share = fields.share;
      let mut form = form(fields);
      if share {
        form.share_slug = Some(fresh_slug(app, None).await?);
      }
      form.validate(app.today)?;
      app.lives.create_live(form).await?;
      output::lives(&app.lives.lives(), json)
    }
    LivesCommand::Edit { live, fields } => {
      let current = find(app, &live).await?;
      let share = fields.share;
      let mut patch = patch(fields);
      if share {
        patch.share_slug = Some(fresh_slug(app, current.share_slug.clone()).await?);
      }
      patch.validate()?;
      app.lives.update_live(current.id, patch).await?;
      output::lives(&app.lives.lives(), json)
    }
    LivesCommand::Remove { live } => {
      let id = find(app, &live).await?.id;
      app.lives.delete_live(id).await?;
      output::lives(&app.lives.lives(), json)
    }
  }
}

pub async fn find(app: &App, input: &str) -> anyhow::Result<Live> {
  app.lives.refresh().await?;
  let lives = app.lives.lives();
  Ok(resolve::by_id_prefix(&lives, input, "live", |live| live.id.to_string())?.clone())
}

/// A slug checked against the lives already shared, never equal to `current`.
async fn fresh_slug(app: &App, current: Option<String>) -> anyhow::Result<String> {
  let request = SlugRequest { check_uniqueness: true, exclude_slug: current, length: app.config.share.slug_length };
  let outcome = app.slugs.generate(&request).await?;
  if outcome.fallback_mode {
    info!(slug = %outcome.slug, "using a share slug that could not be verified");
  }
  Ok(outcome.slug)
}

fn form(fields: LiveFields) -> LiveFormData {
  LiveFormData {
    title: fields.title,
    date: fields.date,
    venue: fields.venue,
    description: fields.description,
    ticket_url: fields.ticket_url,
    is_upcoming: Some(!fields.past),
    share_slug: fields.slug,
  }
}

fn patch(fields: LiveEdits) -> LivePatch {
  LivePatch {
    title: fields.title,
    date: fields.date,
    venue: fields.venue,
    description: fields.description,
    ticket_url: fields.ticket_url,
    is_upcoming: fields.upcoming,
    share_slug: fields.slug,
  }
}
