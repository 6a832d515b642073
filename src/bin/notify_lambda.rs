#[cfg(feature = "lambda")]
use group_provisioner::notify::{PipelineEvent, WebhookNotifier};
#[cfg(feature = "lambda")]
use group_provisioner::utils::logger;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Serialize;
#[cfg(feature = "lambda")]
use serde_json::Value;
#[cfg(feature = "lambda")]
use std::time::Duration;

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    tracing::info!("Starting notification Lambda");

    let webhook_url = std::env::var("SLACK_WEBHOOK_URL")
        .map_err(|_| "SLACK_WEBHOOK_URL environment variable is required")?;

    // API-gateway invocations wrap the event JSON in a `body` string;
    // direct invocations are the event itself.
    let wrapped_body = event
        .payload
        .get("body")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let pipeline_event: PipelineEvent = match wrapped_body {
        Some(body) => serde_json::from_str(&body)?,
        None => serde_json::from_value(event.payload)?,
    };

    let notifier = WebhookNotifier::new(&webhook_url, Duration::from_secs(30))
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let status_code = notifier
        .send(&pipeline_event)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    Ok(Response {
        status_code,
        body: serde_json::json!({"message": "Notification sent"}).to_string(),
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
