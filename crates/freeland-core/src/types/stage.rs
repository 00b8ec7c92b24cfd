use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a run in the provisioning state machine.
///
/// Transitions are strictly forward; any failure jumps to
/// [`Stage::Terminated`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Nothing done yet
    #[default]
    Idle,
    /// Identity record read
    CredentialLoaded,
    /// Authority accepted the handshake
    Entitled,
    /// Egress node address known
    NodeResolved,
    /// Profile artifact written
    ProfileSynthesized,
    /// Engine constructed and started
    HandedOff,
    /// Run over; artifact removed
    Terminated,
}

impl Stage {
    /// The stage that follows this one on success
    #[must_use]
    pub const fn successor(self) -> Self {
        match self {
            Self::Idle => Self::CredentialLoaded,
            Self::CredentialLoaded => Self::Entitled,
            Self::Entitled => Self::NodeResolved,
            Self::NodeResolved => Self::ProfileSynthesized,
            Self::ProfileSynthesized => Self::HandedOff,
            Self::HandedOff | Self::Terminated => Self::Terminated,
        }
    }

    /// Returns true once the run is over
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::CredentialLoaded => "credential-loaded",
            Self::Entitled => "entitled",
            Self::NodeResolved => "node-resolved",
            Self::ProfileSynthesized => "profile-synthesized",
            Self::HandedOff => "handed-off",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_forward_to_terminated() {
        let mut stage = Stage::default();
        let mut seen = vec![stage];
        while !stage.is_terminal() {
            stage = stage.successor();
            seen.push(stage);
        }

        assert_eq!(seen.len(), 7);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Stage::NodeResolved).unwrap();
        assert_eq!(json, "\"node_resolved\"");
    }
}
