use freeland_core::ProvisionError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for profile operations
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;

/// Errors from profile synthesis
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Template is not a JSON document
    #[error("template is not valid JSON: {0}")]
    Syntax(String),

    /// Template parsed but lacks the expected structure
    #[error("unexpected template shape: {0}")]
    Shape(String),

    /// Template file could not be read
    #[error("cannot read template {path}: {source}")]
    ReadTemplate {
        /// Template location
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Profile could not be encoded
    #[error("cannot encode profile: {0}")]
    Encode(#[from] serde_json::Error),

    /// Profile artifact could not be written
    #[error("cannot write profile {path}: {source}")]
    Write {
        /// Artifact location
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

impl From<ProfileError> for ProvisionError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Syntax(_) | ProfileError::Shape(_) => Self::TemplateShape(err.to_string()),
            ProfileError::ReadTemplate { .. } => Self::Config(err.to_string()),
            ProfileError::Encode(_) | ProfileError::Write { .. } => {
                Self::Serialization(err.to_string())
            }
        }
    }
}
