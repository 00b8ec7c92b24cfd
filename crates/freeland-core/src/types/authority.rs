use serde::{Deserialize, Serialize};

/// Default authority host
pub const DEFAULT_AUTHORITY_HOST: &str = "185.92.221.13";

/// Non-default SSH port the authority listens on for entitlement checks
pub const DEFAULT_SSH_PORT: u16 = 26;

/// Where the authority lives.
///
/// Process-wide constant configuration: both the entitlement handshake
/// and node resolution go to the same host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityEndpoint {
    /// Hostname or IP address of the authority
    pub host: String,

    /// Port of the entitlement (SSH) endpoint
    pub ssh_port: u16,

    /// Base URL of the HTTP resolution endpoint, without trailing slash
    pub http_base_url: String,
}

impl AuthorityEndpoint {
    /// Endpoint for `host` with the default SSH port and `http://<host>` base URL
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let http_base_url = format!("http://{host}");
        Self {
            host,
            ssh_port: DEFAULT_SSH_PORT,
            http_base_url,
        }
    }

    /// Override the SSH port
    #[must_use]
    pub const fn with_ssh_port(mut self, port: u16) -> Self {
        self.ssh_port = port;
        self
    }

    /// Override the HTTP base URL
    #[must_use]
    pub fn with_http_base_url(mut self, url: impl Into<String>) -> Self {
        self.http_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for AuthorityEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY_HOST)
    }
}
