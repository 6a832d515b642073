use crate::domain::model::{GroupRow, RowResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read side of the blob store. The provisioner never writes back; the
/// report leaves through the entry point instead.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn credential(&self) -> &str;
    fn source_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<GroupRow>>;
    async fn transform(&self, rows: Vec<GroupRow>) -> Result<Vec<GroupRow>>;
    async fn load(&self, rows: Vec<GroupRow>) -> Result<Vec<RowResult>>;
}
