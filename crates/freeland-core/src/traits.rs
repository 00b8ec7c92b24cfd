//! Seams between the provisioning pipeline and its collaborators.

use crate::{NodeAssignment, Result};
use async_trait::async_trait;
use std::path::Path;

/// Proves to the authority that a subject is currently entitled to the service
#[async_trait]
pub trait EntitlementVerifier: Send + Sync {
    /// Succeeds only if the authority accepted the subject's key.
    ///
    /// Fails with `Credential`, `Connectivity`, `EntitlementRejected` or
    /// `UnknownAuth`.
    async fn confirm_access(&self, subject: &str) -> Result<()>;
}

/// Resolves the egress node assigned to a subject
#[async_trait]
pub trait NodeLocator: Send + Sync {
    /// Fails with `Connectivity` or `Protocol`; never returns an empty address
    async fn resolve_node(&self, subject: &str) -> Result<NodeAssignment>;
}

/// A running (or ready to run) tunneling engine.
///
/// The engine is a black box: the pipeline only starts it and asks it to
/// stop.
#[async_trait]
pub trait TunnelEngine: Send {
    /// Start serving; fails if the engine cannot come up
    async fn start(&mut self) -> Result<()>;

    /// Request shutdown
    async fn close(&mut self) -> Result<()>;
}

/// Builds an engine from a synthesized profile artifact
pub trait EngineLauncher: Send + Sync {
    /// Engine produced by this launcher
    type Engine: TunnelEngine;

    /// Construct an engine that will read its configuration from `profile`
    fn construct(&self, profile: &Path) -> Result<Self::Engine>;
}
