//! Client for the freeland authority.
//!
//! The authority answers two questions before the tunnel may start:
//!
//! - **Is this identity entitled?** [`SshVerifier`] proves possession of the
//!   local private key in an SSH handshake; a completed handshake is the proof.
//! - **Which node is it assigned?** [`AuthorityClient`] asks the HTTP
//!   endpoint and parses the line-oriented answer.

#![doc(html_root_url = "https://docs.rs/freeland-client/3.1.0")]

mod client;
mod config;
mod entitlement;
pub mod api;

pub use client::{AuthorityClient, AuthorityClientBuilder};
pub use config::*;
pub use entitlement::{classify_handshake_failure, SshVerifier, LEGACY_REJECTION_SIGNATURE};
pub use freeland_core::{ProvisionError, Result};
