//! Pipeline notification forwarder: turns a CI pipeline event into a
//! Slack-style webhook message and posts it, passing the upstream status
//! code back to the caller.

use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Loose pipeline event shape. Every field is optional; unknown fields are
/// ignored so any CI system's payload can pass through.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineEvent {
    pub status: Option<String>,
    pub commit: Option<String>,
    pub build_number: Option<Value>,
    pub environment: Option<String>,
}

/// Channel routing by deploy environment.
pub fn channel_for(environment: Option<&str>) -> &'static str {
    match environment {
        Some("production") => "#prod-deployments",
        Some("staging") => "#staging-deployments",
        _ => "#dev-builds",
    }
}

// Build numbers arrive as numbers or strings depending on the CI system.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

/// Builds the webhook message body: fixed headline, one mrkdwn section with
/// status / commit / build, channel routed by environment.
pub fn build_message(event: &PipelineEvent) -> Value {
    let status = event.status.as_deref().unwrap_or("Unknown");
    let commit = event.commit.as_deref().unwrap_or("N/A");
    let build = event
        .build_number
        .as_ref()
        .map(render_value)
        .unwrap_or_else(|| "N/A".to_string());

    json!({
        "text": "🚀 Pipeline Notification",
        "channel": channel_for(event.environment.as_deref()),
        "blocks": [{
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!(
                    "*Status:* {}\n*Commit:* `{}`\n*Build:* #{}",
                    status, commit, build
                )
            }
        }]
    })
}

pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    pub fn new(webhook_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.to_string(),
        })
    }

    /// Posts the event to the webhook and returns the upstream status code.
    /// Non-2xx codes are not errors here: the caller surfaces whatever the
    /// webhook answered.
    pub async fn send(&self, event: &PipelineEvent) -> Result<u16> {
        let message = build_message(event);
        tracing::debug!("Forwarding pipeline event to webhook");

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::info!("📨 Webhook responded with status {}", status);
        Ok(status)
    }
}
