use crate::Stage;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Classified failures of the provisioning pipeline.
///
/// Every variant is terminal for a run: the pipeline never retries and
/// never hands a partial profile to the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// Local identity record or private key is missing or unparsable
    #[error("credential error: {0}")]
    Credential(String),

    /// Network, DNS or timeout failure against either authority endpoint
    #[error("connection failed: {0}")]
    Connectivity(String),

    /// The authority actively refused the entitlement handshake
    #[error("entitlement rejected: {0}")]
    EntitlementRejected(String),

    /// Handshake failed in a way that could not be classified
    #[error("authentication failed: {0}")]
    UnknownAuth(String),

    /// The node resolution response could not be interpreted
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The profile template does not have the expected structure
    #[error("template shape error: {0}")]
    TemplateShape(String),

    /// The synthesized profile could not be encoded or persisted
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The external tunneling engine could not be built, started or stopped
    #[error("engine error: {0}")]
    Engine(String),

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// A pipeline step was attempted out of order
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        /// Stage the pipeline was in
        from: Stage,
        /// Stage the step would have reached
        to: Stage,
    },
}

impl ProvisionError {
    /// Returns true if the authority denied access (quota or time window exceeded)
    #[must_use]
    pub const fn is_entitlement_rejection(&self) -> bool {
        matches!(self, Self::EntitlementRejected(_))
    }

    /// Returns true if the failure happened on the wire
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(
            self,
            Self::Connectivity(_) | Self::EntitlementRejected(_) | Self::UnknownAuth(_)
        )
    }

    /// Short stable name of the error class, used as a log field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Credential(_) => "credential",
            Self::Connectivity(_) => "connectivity",
            Self::EntitlementRejected(_) => "entitlement_rejected",
            Self::UnknownAuth(_) => "unknown_auth",
            Self::Protocol(_) => "protocol",
            Self::TemplateShape(_) => "template_shape",
            Self::Serialization(_) => "serialization",
            Self::Engine(_) => "engine",
            Self::Config(_) => "config",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }

    /// One-line instruction for the operator
    #[must_use]
    pub const fn operator_hint(&self) -> &'static str {
        match self {
            Self::Credential(_) => "not configured yet, run `freeland enroll` first",
            Self::Connectivity(_) => "the authority is unreachable, check your network",
            Self::EntitlementRejected(_) => "out of bandwidth or date",
            Self::UnknownAuth(_) => "the authority did not accept this identity",
            Self::Protocol(_) => "the authority returned no usable node assignment",
            Self::TemplateShape(_) | Self::Serialization(_) => "configuration error",
            Self::Engine(_) => "the tunneling engine failed",
            Self::Config(_) => "fix the settings file or flags",
            Self::InvalidTransition { .. } => "internal sequencing error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_is_distinct_from_connectivity() {
        let rejected = ProvisionError::EntitlementRejected("quota".into());
        let offline = ProvisionError::Connectivity("timed out".into());

        assert!(rejected.is_entitlement_rejection());
        assert!(!offline.is_entitlement_rejection());
        assert!(rejected.is_network_error());
        assert!(offline.is_network_error());
        assert_ne!(rejected.kind(), offline.kind());
    }

    #[test]
    fn local_failures_are_not_network_errors() {
        assert!(!ProvisionError::Credential("missing".into()).is_network_error());
        assert!(!ProvisionError::TemplateShape("vnext".into()).is_network_error());
    }

    #[test]
    fn display_includes_detail() {
        let err = ProvisionError::Protocol("empty body".into());
        assert_eq!(err.to_string(), "protocol error: empty body");
    }
}
