//! Connection profile synthesis.
//!
//! Turns the baseline engine template into a per-identity profile by
//! rewriting exactly two things: the upstream server's `address` and every
//! user's `id`. Everything else in the template passes through untouched.
//!
//! ```rust,ignore
//! use freeland_profile::{synthesize, ProfileTemplate};
//!
//! let artifact = synthesize(&ProfileTemplate::baseline(), "198.51.100.7", "uuid-123", ".config.json")?;
//! println!("profile written to {}", artifact.path().display());
//! ```

#![doc(html_root_url = "https://docs.rs/freeland-profile/3.1.0")]

mod artifact;
mod error;
mod model;
mod template;

pub use artifact::{remove_artifact, SerializedProfile, DEFAULT_ARTIFACT_PATH};
pub use error::{ProfileError, ProfileResult};
pub use model::{ConnectionProfile, Outbound, OutboundSettings, VnextServer, VnextUser};
pub use template::{ProfileTemplate, BASELINE_TEMPLATE};

use std::path::Path;

/// Synthesize a profile for (`address`, `secret`) and persist it at `path`
pub fn synthesize(
    template: &ProfileTemplate,
    address: &str,
    secret: &str,
    path: impl AsRef<Path>,
) -> ProfileResult<SerializedProfile> {
    let profile = template.synthesize(address, secret)?;
    SerializedProfile::write(path, &profile)
}
