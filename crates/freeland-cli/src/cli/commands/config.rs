//! `freeland config` - settings management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Settings;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx).await,
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value).await,
        ConfigCommands::Path => show_path(ctx).await,
    }
}

async fn show_config(ctx: Context) -> Result<()> {
    let settings = &ctx.settings;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Pretty => {
            let unset = || "(default)".dimmed().to_string();

            println!("{}", "Current Settings:".bold());
            println!();
            println!("  {} {}", "authority_host:".bold(), settings.authority_host);
            println!("  {} {}", "ssh_port:".bold(), settings.ssh_port);
            println!(
                "  {} {}",
                "http_base_url:".bold(),
                settings.http_base_url.clone().unwrap_or_else(unset)
            );
            println!("  {} {}", "identity_path:".bold(), settings.identity_path);
            println!(
                "  {} {}",
                "key_path:".bold(),
                settings.key_path.clone().unwrap_or_else(unset)
            );
            println!("  {} {}", "profile_path:".bold(), settings.profile_path);
            println!(
                "  {} {}",
                "template_path:".bold(),
                settings.template_path.clone().unwrap_or_else(|| "(built-in)".dimmed().to_string())
            );
            println!("  {} {}s", "handshake_timeout_secs:".bold(), settings.handshake_timeout_secs);
            println!("  {} {}s", "http_timeout_secs:".bold(), settings.http_timeout_secs);
            println!(
                "  {} {} {}",
                "engine:".bold(),
                settings.engine_command,
                settings.engine_args.join(" ")
            );
        }
    }

    Ok(())
}

async fn set_config(ctx: Context, key: &str, value: &str) -> Result<()> {
    // Start from the file, not the effective settings, so flag overrides are not persisted.
    let mut settings = Settings::load(&ctx.settings_path)?;
    settings.set(key, value)?;
    settings.save(&ctx.settings_path)?;

    if ctx.output_format == OutputFormat::Pretty {
        println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    }

    Ok(())
}

async fn show_path(ctx: Context) -> Result<()> {
    println!("{}", ctx.settings_path.display());
    Ok(())
}
