use crate::error::{ProfileError, ProfileResult};
use crate::model::ConnectionProfile;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the synthesized profile is written, relative to the working directory
pub const DEFAULT_ARTIFACT_PATH: &str = ".config.json";

/// A profile persisted on disk for the engine to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedProfile {
    path: PathBuf,
}

impl SerializedProfile {
    /// Encode `profile` and write it to `path`, replacing any previous content
    pub fn write(path: impl AsRef<Path>, profile: &ConnectionProfile) -> ProfileResult<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = profile.to_json_pretty()?;

        std::fs::write(&path, &bytes).map_err(|source| ProfileError::Write {
            path: path.clone(),
            source,
        })?;
        restrict_permissions(&path).map_err(|source| ProfileError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = bytes.len(), "profile written");
        Ok(Self { path })
    }

    /// Location of the artifact
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the artifact back
    pub fn read(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

// The profile carries the subject's secret.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Delete the artifact at `path`, best effort.
///
/// Returns true if a file was removed. A missing file is not an error.
pub fn remove_artifact(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "profile removed");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove profile");
            false
        }
    }
}
