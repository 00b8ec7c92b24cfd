//! `freeland check` - provision without starting the engine.

use anyhow::Result;
use colored::Colorize;

use super::{provisioning_failure, Context};
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let store = ctx.credential_store()?;
    let mut pipeline = ctx.pipeline()?;

    let profile_path = pipeline
        .provision(&store)
        .await
        .map(|artifact| artifact.path().to_path_buf())
        .map_err(provisioning_failure)?;

    let subject = pipeline
        .identity()
        .map(|id| id.subject().to_string())
        .unwrap_or_default();
    let node = pipeline.node().cloned().unwrap_or_default();
    pipeline.terminate();

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "status": "ok",
                    "subject": subject,
                    "node": node.address,
                    "notices": node.notices,
                    "profile": profile_path.display().to_string(),
                })
            );
        }
        OutputFormat::Pretty => {
            println!("{}", "Configuration OK.".green().bold());
            println!("  {} {}", "subject:".bold(), subject);
            println!("  {} {}", "node:".bold(), node.address.cyan());
            for notice in &node.notices {
                println!("  {} {}", "notice:".bold(), notice.dimmed());
            }
        }
    }

    Ok(())
}
