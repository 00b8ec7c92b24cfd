//! Pre-flight provisioning for the freeland tunnel.
//!
//! Before the tunneling engine may start, the client must prove the local
//! identity is entitled, learn which egress node it was assigned, and write
//! an engine profile pointing at that node.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use freeland::{
//!     AuthorityClient, AuthorityEndpoint, CredentialStore, HandshakeConfig, Pipeline,
//!     ProcessLauncher, ProfileTemplate, SshVerifier,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let endpoint = AuthorityEndpoint::default();
//!     let verifier = SshVerifier::new(endpoint.clone(), HandshakeConfig::new("/home/me/.ssh/id_rsa"));
//!     let locator = AuthorityClient::new(&endpoint)?;
//!
//!     let mut pipeline = Pipeline::new(verifier, locator, ProfileTemplate::baseline(), ".config.json");
//!     pipeline.provision(&CredentialStore::default()).await?;
//!
//!     let mut engine = pipeline.hand_off(&ProcessLauncher::new("v2ray", ["-config", "{profile}"])).await?;
//!     tokio::signal::ctrl_c().await?;
//!     engine.close().await?;
//!     pipeline.terminate();
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/freeland/3.1.0")]

mod credentials;
mod engine;
mod pipeline;

pub use credentials::{CredentialStore, DEFAULT_IDENTITY_PATH};
pub use engine::{ProcessEngine, ProcessLauncher, PROFILE_PLACEHOLDER};
pub use pipeline::{Pipeline, PipelineError};

// Re-export core types
pub use freeland_core::*;

// Re-export the authority client
pub use freeland_client::{
    classify_handshake_failure, AuthorityClient, AuthorityClientBuilder, HandshakeConfig,
    SshVerifier, DEFAULT_HANDSHAKE_TIMEOUT,
};

// Re-export profile synthesis
pub use freeland_profile::{
    remove_artifact, synthesize, ConnectionProfile, ProfileError, ProfileTemplate,
    SerializedProfile, DEFAULT_ARTIFACT_PATH,
};

// Re-export runtime for convenience
pub use tokio;
