//! Node assignment endpoint.
//!
//! The authority answers `GET /node?uname=<subject>` with plain text. The
//! first line carries the assignment, either as `<subject><sep><address>`
//! or as a JSON object with an `address` field. Every following line is
//! operator-facing diagnostics and never changes the result.

use crate::AuthorityClient;
use freeland_core::{NodeAssignment, ProvisionError, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Node assignment endpoints
pub struct NodeApi<'a> {
    client: &'a AuthorityClient,
}

impl<'a> NodeApi<'a> {
    pub(crate) fn new(client: &'a AuthorityClient) -> Self {
        Self { client }
    }

    /// Resolve the egress node assigned to `subject`
    pub async fn resolve(&self, subject: &str) -> Result<NodeAssignment> {
        let body = self.client.get_text("/node", &[("uname", subject)]).await?;
        let assignment = parse_assignment(subject, &body)?;

        debug!(subject, address = %assignment.address, "node resolved");
        for notice in &assignment.notices {
            info!(notice = %notice, "authority notice");
        }

        Ok(assignment)
    }
}

#[derive(Deserialize)]
struct StructuredAssignment {
    address: String,
}

/// Parse a resolution response body for `subject`
pub fn parse_assignment(subject: &str, body: &str) -> Result<NodeAssignment> {
    let mut lines = body.lines();
    let first = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| ProvisionError::Protocol("empty node response".into()))?;

    // Positional form wins whenever the line is addressed to the subject.
    let address = if !first.starts_with(subject) && first.trim_start().starts_with('{') {
        structured_address(first)?
    } else {
        positional_address(subject, first)?
    };

    if address.is_empty() {
        return Err(ProvisionError::Protocol(format!(
            "no address assigned to {subject}"
        )));
    }

    let notices = lines
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    Ok(NodeAssignment { address, notices })
}

fn structured_address(line: &str) -> Result<String> {
    serde_json::from_str::<StructuredAssignment>(line)
        .map(|s| s.address)
        .map_err(|e| ProvisionError::Protocol(format!("malformed node response: {e}")))
}

fn positional_address(subject: &str, line: &str) -> Result<String> {
    let rest = line.strip_prefix(subject).ok_or_else(|| {
        ProvisionError::Protocol(format!("node response is not for {subject}"))
    })?;

    // Exactly one separator character follows the subject.
    let mut chars = rest.chars();
    if chars.next().is_none() {
        return Err(ProvisionError::Protocol(format!(
            "node response for {subject} has no separator"
        )));
    }

    Ok(chars.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_carries_address() {
        let node = parse_assignment("alice", "alice=10.1.2.3\nsome log line\n").unwrap();
        assert_eq!(node.address, "10.1.2.3");
        assert_eq!(node.notices, vec!["some log line".to_string()]);
    }

    #[test]
    fn separator_may_be_any_character() {
        let node = parse_assignment("bob", "bob 198.51.100.7").unwrap();
        assert_eq!(node.address, "198.51.100.7");

        let node = parse_assignment("bob", "bob:node.example:443").unwrap();
        assert_eq!(node.address, "node.example:443");
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let node = parse_assignment("bob", "bob=198.51.100.7\r\nwelcome\r\n").unwrap();
        assert_eq!(node.address, "198.51.100.7");
        assert_eq!(node.notices, vec!["welcome".to_string()]);
    }

    #[test]
    fn notices_do_not_affect_address() {
        let node = parse_assignment("bob", "bob=1.1.1.1\nbob=2.2.2.2\n\nquota 80%").unwrap();
        assert_eq!(node.address, "1.1.1.1");
        assert_eq!(node.notices.len(), 2);
    }

    #[test]
    fn structured_first_line() {
        let node = parse_assignment("bob", "{\"address\":\"198.51.100.7\"}\nhello").unwrap();
        assert_eq!(node.address, "198.51.100.7");
        assert_eq!(node.notices, vec!["hello".to_string()]);
    }

    #[test]
    fn empty_body_is_protocol_error() {
        assert!(matches!(
            parse_assignment("bob", ""),
            Err(ProvisionError::Protocol(_))
        ));
        assert!(matches!(
            parse_assignment("bob", "\n\n"),
            Err(ProvisionError::Protocol(_))
        ));
    }

    #[test]
    fn short_line_fails_without_panicking() {
        assert!(parse_assignment("alice", "ali").is_err());
        assert!(parse_assignment("alice", "alice").is_err());
        assert!(parse_assignment("alice", "alice=").is_err());
    }

    #[test]
    fn foreign_subject_is_rejected() {
        assert!(matches!(
            parse_assignment("alice", "mallory=6.6.6.6"),
            Err(ProvisionError::Protocol(_))
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse_assignment("bob", "{\"addr\": 1}").is_err());
        assert!(parse_assignment("bob", "{\"address\": \"\"}").is_err());
    }

    #[test]
    fn multibyte_separator_is_handled() {
        let node = parse_assignment("zoë", "zoë→10.0.0.1").unwrap();
        assert_eq!(node.address, "10.0.0.1");
    }

    #[test]
    fn brace_subject_uses_positional_form() {
        let node = parse_assignment("{bob}", "{bob}=10.0.0.9\nhello").unwrap();
        assert_eq!(node.address, "10.0.0.9");
        assert_eq!(node.notices, vec!["hello".to_string()]);

        let node = parse_assignment("{bob}", "{\"address\":\"10.0.0.8\"}").unwrap();
        assert_eq!(node.address, "10.0.0.8");
    }
}
