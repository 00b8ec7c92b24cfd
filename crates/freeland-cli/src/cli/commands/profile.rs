//! `freeland profile` - print the synthesized engine profile.

use anyhow::{Context as _, Result};

use super::{provisioning_failure, Context};

pub async fn execute(ctx: Context) -> Result<()> {
    let store = ctx.credential_store()?;
    let mut pipeline = ctx.pipeline()?;

    let content = pipeline
        .provision(&store)
        .await
        .map_err(provisioning_failure)?
        .read()
        .context("reading synthesized profile");
    pipeline.terminate();

    print!("{}", content?);
    Ok(())
}
