use crate::core::Pipeline;
use crate::domain::model::BatchReport;
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Instant;

/// Drives the extract → transform → load stages and assembles the report.
pub struct ProvisionEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ProvisionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BatchReport> {
        let started_at = Utc::now();
        let timer = Instant::now();

        tracing::info!("🚀 Starting group provisioning batch");

        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} data rows", rows.len());

        let rows = self.pipeline.transform(rows).await?;

        let results = self.pipeline.load(rows).await?;

        let report = BatchReport {
            started_at,
            elapsed_ms: timer.elapsed().as_millis() as u64,
            rows: results,
        };

        tracing::info!(
            "✅ Batch finished: {} created, {} failed ({} rows in {} ms)",
            report.created_count(),
            report.failed_count(),
            report.len(),
            report.elapsed_ms
        );

        Ok(report)
    }
}
