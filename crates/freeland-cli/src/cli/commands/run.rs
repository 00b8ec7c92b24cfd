//! `freeland run` - provision, start the engine, stop it on a signal.

use anyhow::Result;
use colored::Colorize;
use freeland::TunnelEngine;
use tracing::{info, warn};

use super::{provisioning_failure, Context};
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let store = ctx.credential_store()?;
    let launcher = ctx.settings.launcher();
    let mut pipeline = ctx.pipeline()?;

    pipeline
        .provision(&store)
        .await
        .map_err(provisioning_failure)?;
    let mut engine = pipeline
        .hand_off(&launcher)
        .await
        .map_err(provisioning_failure)?;

    let node = pipeline.node().map(|n| n.address.clone()).unwrap_or_default();
    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "status": "running", "node": node, "engine": launcher.program() })
            );
        }
        OutputFormat::Pretty => {
            println!(
                "{} tunnel via {} ({})",
                "Running:".green().bold(),
                node.cyan(),
                launcher.program()
            );
        }
    }

    let outcome: Result<()> = tokio::select! {
        signal = shutdown_signal() => signal.map(|name| info!(signal = name, "shutdown requested")),
        status = engine.wait() => match status {
            Ok(status) if status.success() => {
                info!("engine exited");
                Ok(())
            }
            Ok(status) => Err(anyhow::anyhow!("engine exited with {status}")),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = engine.close().await {
        warn!(error = %e, "engine did not stop cleanly");
    }
    pipeline.terminate();

    outcome
}

/// Resolve on SIGINT or SIGTERM, returning the signal name.
async fn shutdown_signal() -> Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res?;
                Ok("SIGINT")
            }
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        Ok("ctrl-c")
    }
}
