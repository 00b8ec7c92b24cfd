//! `freeland enroll` - store the issued identity.

use anyhow::Result;
use colored::Colorize;
use freeland::Identity;

use super::Context;
use crate::cli::args::EnrollArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: EnrollArgs) -> Result<()> {
    let identity = Identity::new(args.uname, args.uuid)?;
    let store = ctx.credential_store()?;
    store.save(&identity)?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "subject": identity.subject(),
                    "path": store.path().display().to_string(),
                })
            );
        }
        OutputFormat::Pretty => {
            println!(
                "{} enrolled {} ({})",
                "Success:".green().bold(),
                identity.subject().cyan(),
                store.path().display()
            );
        }
    }

    Ok(())
}
