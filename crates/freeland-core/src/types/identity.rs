use crate::{ProvisionError, Result};
use std::fmt;

/// The local identity: a subject name registered with the authority and
/// the secret (UUID) assigned to it.
///
/// Loaded once per process and never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    secret: String,
}

impl Identity {
    /// Create an identity, rejecting empty or multi-line fields
    pub fn new(subject: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let subject = subject.into();
        let secret = secret.into();

        for (field, value) in [("subject name", &subject), ("secret", &secret)] {
            if value.is_empty() {
                return Err(ProvisionError::Credential(format!("{field} is empty")));
            }
            if value.contains(['\n', '\r']) {
                return Err(ProvisionError::Credential(format!(
                    "{field} spans more than one line"
                )));
            }
        }

        Ok(Self { subject, secret })
    }

    /// Subject name as registered with the authority
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Secret assigned to the subject
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("subject", &self.subject)
            .field("secret", &"<redacted>")
            .finish()
    }
}
