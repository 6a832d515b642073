use crate::domain::model::GroupPayload;
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Cap on the response-body excerpt kept in a failure reason.
const BODY_EXCERPT_MAX: usize = 200;

/// Row-scoped failure of one creation request. Never escalated to a batch
/// error; the rendered text becomes the row's `Failed { reason }`.
#[derive(Debug, Error)]
pub enum CreateGroupError {
    #[error("HTTP {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("request timed out: {source}")]
    TimedOut { source: reqwest::Error },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin wrapper around the group-management API. Holds one client with a
/// bounded per-request timeout so a stuck endpoint cannot hang the batch.
pub struct GroupApiClient {
    client: Client,
    groups_url: String,
    credential: String,
}

impl GroupApiClient {
    pub fn new(endpoint: &str, credential: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            groups_url: format!("{}/api/v4/groups", endpoint.trim_end_matches('/')),
            credential: credential.to_string(),
        })
    }

    /// Issues one creation request. Any 2xx is success; everything else is a
    /// `CreateGroupError` carrying enough detail for post-hoc debugging.
    pub async fn create_group(
        &self,
        payload: &GroupPayload,
    ) -> std::result::Result<(), CreateGroupError> {
        tracing::debug!("POST {} for group '{}'", self.groups_url, payload.name);

        let response = match self
            .client
            .post(&self.groups_url)
            .header("PRIVATE-TOKEN", &self.credential)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(CreateGroupError::TimedOut { source: e }),
            Err(e) => return Err(CreateGroupError::Transport(e)),
        };

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(BODY_EXCERPT_MAX).collect();
        Err(CreateGroupError::Rejected {
            status,
            body: excerpt,
        })
    }
}
