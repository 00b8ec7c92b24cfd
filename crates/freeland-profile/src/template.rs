use crate::error::{ProfileError, ProfileResult};
use crate::model::ConnectionProfile;
use std::path::Path;
use tracing::debug;

/// Baseline profile shipped with the client
pub const BASELINE_TEMPLATE: &str = include_str!("baseline.json");

/// Unmodified profile document that synthesis starts from
#[derive(Debug, Clone)]
pub struct ProfileTemplate {
    source: String,
}

impl ProfileTemplate {
    /// The built-in baseline template
    #[must_use]
    pub fn baseline() -> Self {
        Self::from_source(BASELINE_TEMPLATE)
    }

    /// A template from an in-memory document
    #[must_use]
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template from disk
    pub fn load(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading profile template");
        std::fs::read_to_string(path)
            .map(Self::from_source)
            .map_err(|source| ProfileError::ReadTemplate {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Raw template text
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the template, checking its shape
    pub fn parse(&self) -> ProfileResult<ConnectionProfile> {
        ConnectionProfile::from_json(&self.source)
    }

    /// Build the profile for (`address`, `secret`) without touching disk
    pub fn synthesize(&self, address: &str, secret: &str) -> ProfileResult<ConnectionProfile> {
        let mut profile = self.parse()?;
        profile.apply(address, secret)?;
        Ok(profile)
    }
}

impl Default for ProfileTemplate {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn baseline_value() -> Value {
        serde_json::from_str(BASELINE_TEMPLATE).unwrap()
    }

    fn synthesized_value(address: &str, secret: &str) -> Value {
        let profile = ProfileTemplate::baseline().synthesize(address, secret).unwrap();
        serde_json::from_slice(&profile.to_json_pretty().unwrap()).unwrap()
    }

    #[test]
    fn baseline_is_valid() {
        let profile = ProfileTemplate::baseline().parse().unwrap();
        assert_eq!(profile.server().unwrap().users.len(), 1);
    }

    #[test]
    fn only_address_and_ids_change() {
        let mut expected = baseline_value();
        *expected
            .pointer_mut("/outbound/settings/vnext/0/address")
            .unwrap() = Value::from("198.51.100.7");
        *expected
            .pointer_mut("/outbound/settings/vnext/0/users/0/id")
            .unwrap() = Value::from("uuid-123");

        assert_eq!(synthesized_value("198.51.100.7", "uuid-123"), expected);
    }

    #[test]
    fn untouched_sections_keep_their_values() {
        let before = baseline_value();
        let after = synthesized_value("10.0.0.1", "secret");

        for pointer in [
            "/inbound",
            "/outboundDetour",
            "/routing",
            "/outbound/streamSettings",
            "/outbound/mux",
            "/outbound/protocol",
            "/outbound/settings/vnext/0/port",
            "/outbound/settings/vnext/0/users/0/alterId",
        ] {
            assert_eq!(before.pointer(pointer), after.pointer(pointer), "{pointer} changed");
        }
    }

    #[test]
    fn synthesis_is_idempotent() {
        let template = ProfileTemplate::baseline();
        let first = template.synthesize("10.0.0.1", "s").unwrap();
        let second = template.synthesize("10.0.0.1", "s").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn address_is_not_validated() {
        let profile = ProfileTemplate::baseline()
            .synthesize("not an address at all", "s")
            .unwrap();
        assert_eq!(profile.server().unwrap().address, "not an address at all");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProfileTemplate::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ProfileError::ReadTemplate { .. }));
    }
}
