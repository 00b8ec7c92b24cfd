//! External tunneling engine run as a child process.

use async_trait::async_trait;
use freeland_core::{EngineLauncher, ProvisionError, Result, TunnelEngine};
use std::path::Path;
use std::process::ExitStatus;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Placeholder in engine arguments replaced by the profile path
pub const PROFILE_PLACEHOLDER: &str = "{profile}";

/// Launches the engine binary with the synthesized profile
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: String,
    args: Vec<String>,
}

impl ProcessLauncher {
    /// Launcher for `program`; `{profile}` in `args` becomes the profile path
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Engine program
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with the placeholder substituted
    #[must_use]
    pub fn args_for(&self, profile: &Path) -> Vec<String> {
        let profile = profile.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(PROFILE_PLACEHOLDER, &profile))
            .collect()
    }
}

impl EngineLauncher for ProcessLauncher {
    type Engine = ProcessEngine;

    fn construct(&self, profile: &Path) -> Result<ProcessEngine> {
        if !profile.is_file() {
            return Err(ProvisionError::Engine(format!(
                "profile {} does not exist",
                profile.display()
            )));
        }

        let args = self.args_for(profile);
        debug!(program = %self.program, ?args, "engine constructed");

        let mut command = Command::new(&self.program);
        command.args(&args).kill_on_drop(true);

        Ok(ProcessEngine {
            program: self.program.clone(),
            command,
            child: None,
        })
    }
}

/// The engine child process
pub struct ProcessEngine {
    program: String,
    command: Command,
    child: Option<Child>,
}

impl ProcessEngine {
    /// True while the child has been spawned and not yet reaped
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Wait for the engine to exit on its own
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let child = self
            .child
            .as_mut()
            .ok_or_else(|| ProvisionError::Engine(format!("{} is not running", self.program)))?;

        let status = child
            .wait()
            .await
            .map_err(|e| ProvisionError::Engine(format!("waiting for {}: {e}", self.program)))?;
        self.child = None;
        Ok(status)
    }
}

#[async_trait]
impl TunnelEngine for ProcessEngine {
    async fn start(&mut self) -> Result<()> {
        if self.child.is_some() {
            return Err(ProvisionError::Engine(format!(
                "{} already started",
                self.program
            )));
        }

        let child = self
            .command
            .spawn()
            .map_err(|e| ProvisionError::Engine(format!("failed to start {}: {e}", self.program)))?;

        info!(program = %self.program, pid = child.id(), "engine started");
        self.child = Some(child);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        match child.kill().await {
            Ok(()) => {
                info!(program = %self.program, "engine stopped");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {
                // Already exited and reaped.
                Ok(())
            }
            Err(e) => {
                warn!(program = %self.program, error = %e, "failed to stop engine");
                Err(ProvisionError::Engine(format!(
                    "failed to stop {}: {e}",
                    self.program
                )))
            }
        }
    }
}
