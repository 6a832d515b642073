use group_provisioner::notify::{PipelineEvent, WebhookNotifier};
use httpmock::prelude::*;
use std::time::Duration;

fn event(environment: &str) -> PipelineEvent {
    PipelineEvent {
        status: Some("success".to_string()),
        commit: Some("abc1234".to_string()),
        build_number: Some(serde_json::json!(42)),
        environment: Some(environment.to_string()),
    }
}

#[tokio::test]
async fn test_production_event_routes_to_prod_channel() {
    let server = MockServer::start();
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook")
            .json_body_partial(r##"{"channel": "#prod-deployments", "text": "🚀 Pipeline Notification"}"##);
        then.status(200).body("ok");
    });

    let notifier = WebhookNotifier::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
    let status = notifier.send(&event("production")).await.unwrap();

    webhook_mock.assert();
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_unknown_environment_routes_to_dev_channel() {
    let server = MockServer::start();
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook")
            .json_body_partial(r##"{"channel": "#dev-builds"}"##);
        then.status(200);
    });

    let notifier = WebhookNotifier::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
    let status = notifier
        .send(&PipelineEvent {
            environment: Some("review/7".to_string()),
            ..PipelineEvent::default()
        })
        .await
        .unwrap();

    webhook_mock.assert();
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_upstream_status_code_is_passed_through() {
    let server = MockServer::start();
    let webhook_mock = server.mock(|when, then| {
        when.method(POST).path("/webhook");
        then.status(500).body("upstream broke");
    });

    let notifier = WebhookNotifier::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
    let status = notifier.send(&event("staging")).await.unwrap();

    webhook_mock.assert();
    assert_eq!(status, 500);
}

#[tokio::test]
async fn test_message_body_carries_status_commit_and_build() {
    let server = MockServer::start();
    let webhook_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webhook")
            .json_body_partial(
                r#"{"blocks": [{"type": "section", "text": {"type": "mrkdwn", "text": "*Status:* success\n*Commit:* `abc1234`\n*Build:* #42"}}]}"#,
            );
        then.status(200);
    });

    let notifier = WebhookNotifier::new(&server.url("/webhook"), Duration::from_secs(5)).unwrap();
    notifier.send(&event("staging")).await.unwrap();

    webhook_mock.assert();
}
