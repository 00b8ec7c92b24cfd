//! Core types and traits for the freeland provisioning client.
//!
//! This crate provides the foundational types shared by every other crate:
//!
//! - **Types**: the local [`Identity`], the [`AuthorityEndpoint`], the
//!   resolved [`NodeAssignment`] and the pipeline [`Stage`]
//! - **Errors**: the classified failure taxonomy in [`ProvisionError`]
//! - **Traits**: the seams between the pipeline and its collaborators
//!   ([`EntitlementVerifier`], [`NodeLocator`], [`EngineLauncher`],
//!   [`TunnelEngine`])
//!
//! # Example
//!
//! ```rust,ignore
//! use freeland_core::{Identity, NodeLocator, Result};
//!
//! async fn lookup(locator: &impl NodeLocator, identity: &Identity) -> Result<String> {
//!     let node = locator.resolve_node(identity.subject()).await?;
//!     Ok(node.address)
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/freeland-core/3.1.0")]

mod error;
mod traits;
pub mod types;

pub use error::{ProvisionError, Result};
pub use traits::*;
pub use types::*;
