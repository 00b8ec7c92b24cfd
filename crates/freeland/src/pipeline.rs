//! The provisioning state machine.
//!
//! `Idle → CredentialLoaded → Entitled → NodeResolved → ProfileSynthesized
//! → HandedOff → Terminated`, strictly forward. A failed step terminates the
//! run immediately, and termination always removes the profile artifact.

use crate::credentials::CredentialStore;
use freeland_core::{
    EngineLauncher, EntitlementVerifier, Identity, NodeAssignment, NodeLocator, ProvisionError,
    Stage, TunnelEngine,
};
use freeland_profile::{remove_artifact, ProfileTemplate, SerializedProfile};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// A provisioning failure and how far the run got before it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("provisioning failed after stage {stage}: {source}")]
pub struct PipelineError {
    /// Last stage reached successfully
    pub stage: Stage,
    /// The classified failure
    pub source: ProvisionError,
}

impl PipelineError {
    /// The classified failure
    #[must_use]
    pub fn into_inner(self) -> ProvisionError {
        self.source
    }
}

type StepResult<T> = std::result::Result<T, PipelineError>;

/// One provisioning run
pub struct Pipeline<V, L> {
    verifier: V,
    locator: L,
    template: ProfileTemplate,
    artifact_path: PathBuf,
    stage: Stage,
    identity: Option<Identity>,
    node: Option<NodeAssignment>,
    artifact: Option<SerializedProfile>,
}

impl<V, L> Pipeline<V, L>
where
    V: EntitlementVerifier,
    L: NodeLocator,
{
    /// Create an idle run that will write its profile to `artifact_path`
    pub fn new(verifier: V, locator: L, template: ProfileTemplate, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            verifier,
            locator,
            template,
            artifact_path: artifact_path.into(),
            stage: Stage::Idle,
            identity: None,
            node: None,
            artifact: None,
        }
    }

    /// Current stage
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Identity, once loaded
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Node assignment, once resolved
    pub const fn node(&self) -> Option<&NodeAssignment> {
        self.node.as_ref()
    }

    /// Profile artifact, once written and until termination
    pub const fn artifact(&self) -> Option<&SerializedProfile> {
        self.artifact.as_ref()
    }

    /// Where the profile artifact is (or will be) written
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Run every step up to and including profile synthesis
    pub async fn provision(&mut self, store: &CredentialStore) -> StepResult<&SerializedProfile> {
        self.load_credentials(store)?;
        self.confirm_access().await?;
        self.resolve_node().await?;
        self.synthesize()
    }

    /// `Idle → CredentialLoaded`.
    ///
    /// Also sweeps a profile artifact left behind by an earlier run.
    pub fn load_credentials(&mut self, store: &CredentialStore) -> StepResult<&Identity> {
        self.enter(Stage::Idle, Stage::CredentialLoaded)?;

        if remove_artifact(&self.artifact_path) {
            info!(path = %self.artifact_path.display(), "removed stale profile");
        }

        let identity = store.load().map_err(|e| self.fail(e))?;
        self.advance();
        Ok(self.identity.insert(identity))
    }

    /// `CredentialLoaded → Entitled`
    pub async fn confirm_access(&mut self) -> StepResult<()> {
        let subject = self.enter_with_identity(Stage::CredentialLoaded, Stage::Entitled)?;

        let result = self.verifier.confirm_access(&subject).await;
        result.map_err(|e| self.fail(e))?;

        self.advance();
        Ok(())
    }

    /// `Entitled → NodeResolved`.
    ///
    /// The assignment is resolved once per run; later calls return it
    /// without asking the authority again.
    pub async fn resolve_node(&mut self) -> StepResult<NodeAssignment> {
        if let Some(node) = &self.node {
            return Ok(node.clone());
        }

        let subject = self.enter_with_identity(Stage::Entitled, Stage::NodeResolved)?;

        let result = self.locator.resolve_node(&subject).await;
        let node = result.map_err(|e| self.fail(e))?;
        if node.address.is_empty() {
            return Err(self.fail(ProvisionError::Protocol(format!(
                "empty node assignment for {subject}"
            ))));
        }

        self.advance();
        Ok(self.node.insert(node).clone())
    }

    /// `NodeResolved → ProfileSynthesized`
    pub fn synthesize(&mut self) -> StepResult<&SerializedProfile> {
        self.enter(Stage::NodeResolved, Stage::ProfileSynthesized)?;

        let result = match (&self.identity, &self.node) {
            (Some(identity), Some(node)) => freeland_profile::synthesize(
                &self.template,
                &node.address,
                identity.secret(),
                &self.artifact_path,
            )
            .map_err(ProvisionError::from),
            _ => Err(ProvisionError::InvalidTransition {
                from: self.stage,
                to: Stage::ProfileSynthesized,
            }),
        };
        let artifact = result.map_err(|e| self.fail(e))?;

        self.advance();
        Ok(self.artifact.insert(artifact))
    }

    /// `ProfileSynthesized → HandedOff`: build the engine from the profile and start it
    pub async fn hand_off<E>(&mut self, launcher: &E) -> StepResult<E::Engine>
    where
        E: EngineLauncher,
    {
        self.enter(Stage::ProfileSynthesized, Stage::HandedOff)?;

        let path = self.artifact_path.clone();
        let mut engine = launcher.construct(&path).map_err(|e| self.fail(e))?;
        let started = engine.start().await;
        started.map_err(|e| self.fail(e))?;

        self.advance();
        Ok(engine)
    }

    /// End the run: remove the profile artifact, best effort. Idempotent.
    pub fn terminate(&mut self) {
        if self.stage.is_terminal() {
            return;
        }

        remove_artifact(&self.artifact_path);
        self.artifact = None;
        info!(from = %self.stage, "provisioning run terminated");
        self.stage = Stage::Terminated;
    }

    fn enter(&self, expected: Stage, to: Stage) -> StepResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(PipelineError {
                stage: self.stage,
                source: ProvisionError::InvalidTransition {
                    from: self.stage,
                    to,
                },
            })
        }
    }

    fn enter_with_identity(&mut self, expected: Stage, to: Stage) -> StepResult<String> {
        self.enter(expected, to)?;
        match &self.identity {
            Some(identity) => Ok(identity.subject().to_string()),
            None => Err(self.fail(ProvisionError::InvalidTransition {
                from: self.stage,
                to,
            })),
        }
    }

    fn advance(&mut self) {
        let next = self.stage.successor();
        info!(from = %self.stage, to = %next, "stage reached");
        self.stage = next;
    }

    /// Record a failed step and terminate the run
    fn fail(&mut self, source: ProvisionError) -> PipelineError {
        let stage = self.stage;
        error!(stage = %stage, kind = source.kind(), error = %source, "provisioning step failed");
        self.terminate();
        PipelineError { stage, source }
    }
}

impl<V, L> Drop for Pipeline<V, L> {
    fn drop(&mut self) {
        if !self.stage.is_terminal() && self.artifact.is_some() {
            remove_artifact(&self.artifact_path);
        }
    }
}
