use anyhow::bail;

use livelink_core::services::{ShareLookup, ShareRequest, SlugRequest};

use crate::app::App;
use crate::cli::{ShareArgs, SlugArgs};
use crate::output;

pub async fn show(app: &App, args: ShareArgs, json: bool) -> anyhow::Result<()> {
  let request = ShareRequest { share_slug: args.slug, include_metadata: args.metadata, include_metrics: args.metrics };

  match app.share.snapshot(&request).await? {
    ShareLookup::Found(snapshot) => output::share(&snapshot, json),
    ShareLookup::NotFound => bail!("no live is shared as {:?}", request.share_slug),
  }
}

pub async fn slug(app: &App, args: SlugArgs, json: bool) -> anyhow::Result<()> {
  let request = SlugRequest {
    check_uniqueness: args.check,
    exclude_slug: args.exclude,
    length: args.length.unwrap_or(app.config.share.slug_length),
  };
  let outcome = app.slugs.generate(&request).await?;
  output::slug(&outcome, json)
}
