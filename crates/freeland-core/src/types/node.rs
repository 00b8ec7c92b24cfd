use serde::{Deserialize, Serialize};

/// The egress node assigned to an identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAssignment {
    /// Address of the egress node, used verbatim in the profile
    pub address: String,

    /// Diagnostic lines that followed the assignment in the response
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

impl NodeAssignment {
    /// Assignment without notices
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            notices: Vec::new(),
        }
    }
}
