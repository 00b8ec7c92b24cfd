//! Configuration management.

use anyhow::{Context as _, Result};
use directories::{BaseDirs, ProjectDirs};
use freeland::{
    AuthorityEndpoint, HandshakeConfig, ProcessLauncher, ProfileTemplate, DEFAULT_ARTIFACT_PATH,
    DEFAULT_AUTHORITY_HOST, DEFAULT_IDENTITY_PATH, DEFAULT_SSH_PORT, PROFILE_PLACEHOLDER,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::OutputFormat;

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host of the authority (entitlement and node resolution).
    pub authority_host: String,

    /// SSH port of the entitlement endpoint.
    pub ssh_port: u16,

    /// Base URL of the resolution endpoint (default: `http://<authority_host>`).
    pub http_base_url: Option<String>,

    /// Two-line identity record written by `freeland enroll`.
    pub identity_path: String,

    /// Private key used for the entitlement handshake (default: `~/.ssh/id_rsa`).
    pub key_path: Option<String>,

    /// Where the synthesized profile is written.
    pub profile_path: String,

    /// Template to synthesize from instead of the built-in baseline.
    pub template_path: Option<String>,

    /// Bound on the entitlement handshake, in seconds.
    pub handshake_timeout_secs: u64,

    /// Bound on the node resolution request, in seconds.
    pub http_timeout_secs: u64,

    /// Engine executable.
    pub engine_command: String,

    /// Engine arguments; `{profile}` is replaced by the profile path.
    pub engine_args: Vec<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            ssh_port: DEFAULT_SSH_PORT,
            http_base_url: None,
            identity_path: DEFAULT_IDENTITY_PATH.to_string(),
            key_path: None,
            profile_path: DEFAULT_ARTIFACT_PATH.to_string(),
            template_path: None,
            handshake_timeout_secs: 15,
            http_timeout_secs: 10,
            engine_command: String::from("v2ray"),
            engine_args: vec![String::from("-config"), PROFILE_PLACEHOLDER.to_string()],
            output_format: None,
        }
    }
}

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "freeland", "freeland")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load settings from `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parsing settings {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Update one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());

        match key {
            "authority_host" | "authority" => self.authority_host = value.to_string(),
            "ssh_port" => self.ssh_port = value.parse().context("ssh_port must be a port number")?,
            "http_base_url" => self.http_base_url = optional(value),
            "identity_path" => self.identity_path = value.to_string(),
            "key_path" => self.key_path = optional(value),
            "profile_path" => self.profile_path = value.to_string(),
            "template_path" => self.template_path = optional(value),
            "handshake_timeout_secs" => {
                self.handshake_timeout_secs = value.parse().context("expected seconds")?;
            }
            "http_timeout_secs" => {
                self.http_timeout_secs = value.parse().context("expected seconds")?;
            }
            "engine_command" => self.engine_command = value.to_string(),
            "engine_args" => {
                self.engine_args = value.split_whitespace().map(String::from).collect();
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            _ => {
                anyhow::bail!(
                    "Unknown config key: {}\n\n\
                     Available keys:\n  \
                     authority_host         - Authority hostname or IP\n  \
                     ssh_port               - Entitlement SSH port\n  \
                     http_base_url          - Node resolution base URL\n  \
                     identity_path          - Identity record written by enroll\n  \
                     key_path               - Private key for the handshake\n  \
                     profile_path           - Where the engine profile is written\n  \
                     template_path          - Custom profile template\n  \
                     handshake_timeout_secs - Handshake timeout\n  \
                     http_timeout_secs      - Resolution timeout\n  \
                     engine_command         - Engine executable\n  \
                     engine_args            - Engine arguments ({{profile}} = profile path)\n  \
                     output_format          - Default output format (pretty/json)",
                    key
                );
            }
        }

        Ok(())
    }

    /// Authority endpoint described by these settings.
    pub fn endpoint(&self) -> AuthorityEndpoint {
        let endpoint = AuthorityEndpoint::new(&self.authority_host).with_ssh_port(self.ssh_port);
        match &self.http_base_url {
            Some(url) => endpoint.with_http_base_url(url),
            None => endpoint,
        }
    }

    /// Identity record location.
    pub fn identity_path(&self) -> Result<PathBuf> {
        expand(&self.identity_path)
    }

    /// Profile artifact location.
    pub fn profile_path(&self) -> Result<PathBuf> {
        expand(&self.profile_path)
    }

    /// Private key location.
    pub fn key_path(&self) -> Result<PathBuf> {
        match &self.key_path {
            Some(path) => expand(path),
            None => {
                let dirs = BaseDirs::new()
                    .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
                Ok(dirs.home_dir().join(".ssh").join("id_rsa"))
            }
        }
    }

    /// Handshake settings for the entitlement check.
    pub fn handshake(&self) -> Result<HandshakeConfig> {
        Ok(HandshakeConfig::new(self.key_path()?)
            .timeout(Duration::from_secs(self.handshake_timeout_secs)))
    }

    /// Timeout for node resolution.
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Template to synthesize from.
    pub fn template(&self) -> Result<ProfileTemplate> {
        match &self.template_path {
            Some(path) => Ok(ProfileTemplate::load(expand(path)?)?),
            None => Ok(ProfileTemplate::baseline()),
        }
    }

    /// Engine launcher.
    pub fn launcher(&self) -> ProcessLauncher {
        ProcessLauncher::new(&self.engine_command, self.engine_args.iter().cloned())
    }
}

/// Expand `~` and environment variables in a configured path.
pub fn expand(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| format!("expanding path {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
