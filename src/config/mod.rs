pub mod cli;
pub mod lambda;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

/// Token used when no credential is configured, so sandbox runs keep
/// working without one. Every config path that falls back to it logs a
/// warning instead of adopting it silently.
pub const PLACEHOLDER_CREDENTIAL: &str = "dummy-token";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "group-provisioner")]
#[command(about = "Batch-create groups in a GitLab-compatible API from a CSV sheet")]
pub struct CliConfig {
    /// Path to the CSV file (group_name,description,visibility header)
    #[arg(long, default_value = "groups.csv")]
    pub source: String,

    /// Base URL of the group-management API
    #[arg(long)]
    pub endpoint: String,

    /// Bearer token sent as PRIVATE-TOKEN; falls back to a placeholder
    #[arg(long)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn credential(&self) -> &str {
        self.token.as_deref().unwrap_or(PLACEHOLDER_CREDENTIAL)
    }

    fn source_key(&self) -> &str {
        &self.source
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_path("source", &self.source)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;

        if self.token.is_none() {
            tracing::warn!(
                "⚠️ No credential configured; falling back to the '{}' placeholder token",
                PLACEHOLDER_CREDENTIAL
            );
        }

        Ok(())
    }
}
