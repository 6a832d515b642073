#[cfg(feature = "lambda")]
use crate::config::PLACEHOLDER_CREDENTIAL;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, Storage};
#[cfg(feature = "lambda")]
use crate::utils::error::{ProvisionError, Result};
#[cfg(feature = "lambda")]
use crate::utils::validation::{
    validate_bucket_name, validate_non_empty_string, validate_range, validate_url, Validate,
};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;
#[cfg(feature = "lambda")]
use std::time::Duration;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub endpoint: String,
    pub s3_bucket: String,
    pub s3_region: String,
    pub source_key: String,
    pub credential: String,
    pub timeout_seconds: u64,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let credential = match env::var("GITLAB_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token,
            _ => {
                tracing::warn!(
                    "⚠️ GITLAB_TOKEN is not set; falling back to the '{}' placeholder token",
                    PLACEHOLDER_CREDENTIAL
                );
                PLACEHOLDER_CREDENTIAL.to_string()
            }
        };

        Ok(Self {
            endpoint: env::var("GITLAB_URL").map_err(|_| ProvisionError::MissingConfigError {
                field: "GITLAB_URL".to_string(),
            })?,
            s3_bucket: env::var("S3_BUCKET").map_err(|_| ProvisionError::MissingConfigError {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            source_key: env::var("SOURCE_KEY").unwrap_or_else(|_| "groups.csv".to_string()),
            credential,
            timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn credential(&self) -> &str {
        &self.credential
    }

    fn source_key(&self) -> &str {
        &self.source_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_region", &self.s3_region)?;
        validate_non_empty_string("source_key", &self.source_key)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ProvisionError::SourceUnavailable {
                message: format!("failed to read s3://{}/{}: {}", self.bucket, key, e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| ProvisionError::SourceUnavailable {
                message: format!("failed to collect s3://{}/{} body: {}", self.bucket, key, e),
            })?;

        Ok(data.into_bytes().to_vec())
    }
}
