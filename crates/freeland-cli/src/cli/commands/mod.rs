//! Command implementations.

pub mod check;
pub mod config;
pub mod enroll;
pub mod profile;
pub mod run;

use freeland::{AuthorityClient, CredentialStore, Pipeline, PipelineError, SshVerifier};
use std::path::PathBuf;

use crate::config::Settings;
use crate::output::OutputFormat;

/// Pipeline wired to the real authority.
pub type AuthorityPipeline = Pipeline<SshVerifier, AuthorityClient>;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective settings
    pub settings: Settings,

    /// Where the settings were loaded from
    pub settings_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Identity record store.
    pub fn credential_store(&self) -> anyhow::Result<CredentialStore> {
        Ok(CredentialStore::new(self.settings.identity_path()?))
    }

    /// Build an idle provisioning pipeline against the configured authority.
    pub fn pipeline(&self) -> anyhow::Result<AuthorityPipeline> {
        let endpoint = self.settings.endpoint();
        let verifier = SshVerifier::new(endpoint.clone(), self.settings.handshake()?);
        let locator = AuthorityClient::builder(&endpoint)
            .timeout(self.settings.http_timeout())
            .build()?;

        Ok(Pipeline::new(
            verifier,
            locator,
            self.settings.template()?,
            self.settings.profile_path()?,
        ))
    }
}

/// Turn a pipeline failure into an error that leads with the operator hint.
pub fn provisioning_failure(err: PipelineError) -> anyhow::Error {
    let hint = err.source.operator_hint();
    anyhow::Error::new(err).context(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use freeland::{ProvisionError, Stage};

    #[test]
    fn context_wires_settings_into_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile.json");

        let mut settings = Settings::default();
        settings.set("profile_path", &profile.display().to_string()).unwrap();
        settings.set("key_path", "/nonexistent/id_rsa").unwrap();

        let ctx = Context {
            settings,
            settings_path: dir.path().join("config.toml"),
            output_format: OutputFormat::Json,
        };

        let pipeline = ctx.pipeline().unwrap();
        assert_eq!(pipeline.stage(), Stage::Idle);
        assert_eq!(pipeline.artifact_path(), profile);
    }

    #[test]
    fn failure_leads_with_hint() {
        let err = provisioning_failure(PipelineError {
            stage: Stage::Entitled,
            source: ProvisionError::EntitlementRejected("refused".into()),
        });
        assert_eq!(err.to_string(), "out of bandwidth or date");
        assert!(format!("{err:#}").contains("refused"));
    }
}
