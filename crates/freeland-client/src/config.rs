//! Client configuration types.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default bound on the entitlement handshake
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for the entitlement handshake
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// Private key presented to the authority
    pub key_path: PathBuf,

    /// Upper bound for connecting plus authenticating
    pub timeout: Duration,
}

impl HandshakeConfig {
    /// Create a configuration using the key at `key_path`
    #[must_use]
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }

    /// Set the handshake timeout
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Path of the private key
    #[must_use]
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }
}
