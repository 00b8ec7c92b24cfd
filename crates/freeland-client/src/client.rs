//! HTTP side of the authority client.

use crate::api::NodeApi;
use async_trait::async_trait;
use freeland_core::{AuthorityEndpoint, NodeAssignment, NodeLocator, ProvisionError, Result};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the authority's resolution endpoint
#[derive(Clone)]
pub struct AuthorityClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
}

impl AuthorityClient {
    /// Create a client for the given endpoint using default settings
    pub fn new(endpoint: &AuthorityEndpoint) -> Result<Self> {
        AuthorityClientBuilder::new(endpoint).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(endpoint: &AuthorityEndpoint) -> AuthorityClientBuilder {
        AuthorityClientBuilder::new(endpoint)
    }

    /// Access node assignment endpoints
    #[must_use]
    pub fn nodes(&self) -> NodeApi<'_> {
        NodeApi::new(self)
    }

    /// Perform a GET request with query parameters and return the body as text
    pub(crate) async fn get_text(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = self.build_url(path, params)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "authority refused request");
            return Err(ProvisionError::Connectivity(format!(
                "{url} returned HTTP {}",
                status.as_u16()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&url, &e))
    }

    /// Build a URL below the base URL with encoded query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ProvisionError::Config(format!("invalid request path {path}: {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    fn map_transport_error(&self, url: &Url, err: &reqwest::Error) -> ProvisionError {
        if err.is_timeout() {
            ProvisionError::Connectivity(format!(
                "{url} timed out after {} seconds",
                self.inner.timeout.as_secs()
            ))
        } else {
            ProvisionError::Connectivity(format!("{url}: {err}"))
        }
    }
}

#[async_trait]
impl NodeLocator for AuthorityClient {
    async fn resolve_node(&self, subject: &str) -> Result<NodeAssignment> {
        self.nodes().resolve(subject).await
    }
}

/// Builder for configuring an [`AuthorityClient`]
pub struct AuthorityClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl AuthorityClientBuilder {
    /// Create a new builder targeting the endpoint's HTTP base URL
    #[must_use]
    pub fn new(endpoint: &AuthorityEndpoint) -> Self {
        Self {
            base_url: endpoint.http_base_url.clone(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("freeland/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AuthorityClient> {
        // A trailing slash makes `Url::join` append rather than replace the last segment.
        let mut base = self.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| ProvisionError::Config(format!("invalid authority URL {base}: {e}")))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| ProvisionError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(AuthorityClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}
