//! Local identity record.
//!
//! A plaintext file of two lines: the subject name, then the secret. Written
//! once at enrollment and read once per run.

use freeland_core::{Identity, ProvisionError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Identity record location, relative to the working directory
pub const DEFAULT_IDENTITY_PATH: &str = ".freeland.conf";

/// Reads and writes the local identity record
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the identity.
    ///
    /// Lines after the second are ignored.
    pub fn load(&self) -> Result<Identity> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProvisionError::Credential(format!(
                    "no identity record at {}",
                    self.path.display()
                ))
            } else {
                ProvisionError::Credential(format!(
                    "cannot read identity record {}: {e}",
                    self.path.display()
                ))
            }
        })?;

        let mut lines = content.lines();
        let subject = lines.next().unwrap_or_default();
        let secret = lines.next().unwrap_or_default();
        let identity = Identity::new(subject, secret).map_err(|e| match e {
            ProvisionError::Credential(reason) => ProvisionError::Credential(format!(
                "identity record {} is incomplete: {reason}",
                self.path.display()
            )),
            other => other,
        })?;

        debug!(path = %self.path.display(), subject = identity.subject(), "identity loaded");
        Ok(identity)
    }

    /// Write the identity, replacing any existing record
    pub fn save(&self, identity: &Identity) -> Result<()> {
        let content = format!("{}\n{}\n", identity.subject(), identity.secret());
        std::fs::write(&self.path, content).map_err(|e| {
            ProvisionError::Credential(format!(
                "cannot write identity record {}: {e}",
                self.path.display()
            ))
        })?;
        restrict_permissions(&self.path).map_err(|e| {
            ProvisionError::Credential(format!(
                "cannot restrict identity record {}: {e}",
                self.path.display()
            ))
        })?;

        info!(path = %self.path.display(), subject = identity.subject(), "identity saved");
        Ok(())
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_PATH)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join(DEFAULT_IDENTITY_PATH))
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let identity = Identity::new("bob", "uuid-123").unwrap();

        store.save(&identity).unwrap();

        assert_eq!(store.load().unwrap(), identity);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "bob\nuuid-123\n"
        );
    }

    #[test]
    fn missing_record_is_credential_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_in(&dir).load().unwrap_err();
        assert!(matches!(err, ProvisionError::Credential(_)));
    }

    #[test]
    fn one_line_record_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "bob\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, ProvisionError::Credential(_)));
    }

    #[test]
    fn extra_lines_and_crlf_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "bob\r\nuuid-123\r\nleftover\n").unwrap();

        let identity = store.load().unwrap();
        assert_eq!(identity.subject(), "bob");
        assert_eq!(identity.secret(), "uuid-123");
    }
}
