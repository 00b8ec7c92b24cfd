//! Typed view of the engine profile.
//!
//! Only the path down to the two rewritten fields is typed. Every other key
//! at each level is kept in a flattened `extra` map so it re-serializes with
//! the same content.

use crate::error::{ProfileError, ProfileResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete engine profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// The outbound tunnel client block
    pub outbound: Outbound,

    /// Inbound listener, detours, routing and anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outbound tunnel client block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
    /// Protocol settings holding the upstream server list
    pub settings: OutboundSettings,

    /// Protocol, stream/transport settings, mux flag
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings of the outbound block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundSettings {
    /// Upstream servers; a valid profile has exactly one
    pub vnext: Vec<VnextServer>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The upstream server the engine connects out to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnextServer {
    /// Host or IP of the egress node
    pub address: String,

    /// Users presented to the server; a valid profile has at least one
    pub users: Vec<VnextUser>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user entry of the upstream server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnextUser {
    /// User identifier (the subject's secret once synthesized)
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConnectionProfile {
    /// Parse a profile document, checking its shape
    pub fn from_json(source: &str) -> ProfileResult<Self> {
        let profile: Self = serde_json::from_str(source).map_err(|e| {
            if e.is_data() {
                ProfileError::Shape(e.to_string())
            } else {
                ProfileError::Syntax(e.to_string())
            }
        })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Check the cardinality constraints serde cannot express
    pub fn validate(&self) -> ProfileResult<()> {
        let servers = &self.outbound.settings.vnext;
        if servers.len() != 1 {
            return Err(ProfileError::Shape(format!(
                "outbound.settings.vnext must hold exactly one server, found {}",
                servers.len()
            )));
        }
        if servers[0].users.is_empty() {
            return Err(ProfileError::Shape(
                "outbound.settings.vnext[0].users is empty".into(),
            ));
        }
        Ok(())
    }

    /// The single upstream server
    pub fn server(&self) -> ProfileResult<&VnextServer> {
        self.validate()?;
        Ok(&self.outbound.settings.vnext[0])
    }

    fn server_mut(&mut self) -> ProfileResult<&mut VnextServer> {
        self.validate()?;
        Ok(&mut self.outbound.settings.vnext[0])
    }

    /// Point the profile at `address` and give every user the id `secret`
    pub fn apply(&mut self, address: &str, secret: &str) -> ProfileResult<()> {
        let server = self.server_mut()?;
        server.address = address.to_string();
        for user in &mut server.users {
            user.id = secret.to_string();
        }
        Ok(())
    }

    /// Encode as pretty-printed JSON
    pub fn to_json_pretty(&self) -> ProfileResult<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
