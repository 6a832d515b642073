#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use group_provisioner::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use group_provisioner::domain::model::BatchReport;
#[cfg(feature = "lambda")]
use group_provisioner::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use group_provisioner::{GroupPipeline, ProvisionEngine};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub s3_bucket: Option<String>,
    pub gitlab_url: Option<String>,
    pub source_key: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
    pub created: usize,
    pub failed: usize,
    pub report: BatchReport,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting group provisioning Lambda");

    // The event may override the environment before the config is read.
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(url) = &event.payload.gitlab_url {
        std::env::set_var("GITLAB_URL", url);
    }
    if let Some(key) = &event.payload.source_key {
        std::env::set_var("SOURCE_KEY", key);
    }

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let pipeline = GroupPipeline::new(storage, lambda_config)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let engine = ProvisionEngine::new(pipeline);
    let report = engine
        .run()
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // Row failures stay out of the status code; the report carries them.
    let response = Response {
        status_code: 200,
        body: "Groups processed".to_string(),
        created: report.created_count(),
        failed: report.failed_count(),
        report,
    };

    tracing::info!("Group provisioning Lambda completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
