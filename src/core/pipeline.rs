use crate::core::client::GroupApiClient;
use crate::core::parse;
use crate::core::{ConfigProvider, GroupRow, Pipeline, ProvisionOutcome, RowResult, Storage};
use crate::domain::model::RowState;
use crate::utils::error::{ProvisionError, Result};

/// The provisioning batch as an extract/transform/load pipeline over the
/// storage and config ports.
pub struct GroupPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: GroupApiClient,
}

impl<S: Storage, C: ConfigProvider> GroupPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = GroupApiClient::new(
            config.api_endpoint(),
            config.credential(),
            config.request_timeout(),
        )?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GroupPipeline<S, C> {
    /// Fetches the source object and parses it into ordered rows. Any
    /// storage failure is `SourceUnavailable` regardless of the backend;
    /// nothing has been sent to the API at this point.
    async fn extract(&self) -> Result<Vec<GroupRow>> {
        let key = self.config.source_key();
        tracing::debug!("Fetching source object '{}'", key);

        let raw = self
            .storage
            .read_file(key)
            .await
            .map_err(ProvisionError::source_unavailable)?;

        tracing::debug!("Fetched {} bytes from '{}'", raw.len(), key);
        parse::parse_rows(&raw)
    }

    /// Validates parsed rows. A blank `group_name` is a data error: the
    /// column exists, the value is unusable, so the row is rejected in
    /// place rather than failing the parse.
    async fn transform(&self, rows: Vec<GroupRow>) -> Result<Vec<GroupRow>> {
        Ok(rows
            .into_iter()
            .map(|mut row| {
                if let RowState::Ready(record) = &row.state {
                    if record.group_name.trim().is_empty() {
                        tracing::warn!("⚠️ Row {} has an empty group_name", row.row);
                        row.state = RowState::Rejected {
                            reason: "group_name is empty".to_string(),
                        };
                    }
                }
                row
            })
            .collect())
    }

    /// Issues one creation request per ready row, strictly in input order,
    /// one at a time. A failed row is recorded and skipped; the batch never
    /// aborts and never retries.
    async fn load(&self, rows: Vec<GroupRow>) -> Result<Vec<RowResult>> {
        let mut results = Vec::with_capacity(rows.len());

        for row in rows {
            let outcome = match &row.state {
                RowState::Ready(record) => match self.client.create_group(&record.payload()).await
                {
                    Ok(()) => {
                        tracing::info!("✅ Created group '{}' (row {})", row.group_name, row.row);
                        ProvisionOutcome::Created
                    }
                    Err(e) => {
                        tracing::warn!(
                            "⚠️ Failed to create group '{}' (row {}): {}",
                            row.group_name,
                            row.row,
                            e
                        );
                        ProvisionOutcome::Failed {
                            reason: e.to_string(),
                        }
                    }
                },
                RowState::Rejected { reason } => {
                    tracing::warn!("⚠️ Row {} skipped: {}", row.row, reason);
                    ProvisionOutcome::Failed {
                        reason: reason.clone(),
                    }
                }
            };

            results.push(RowResult {
                row: row.row,
                group_name: row.group_name,
                outcome,
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::ProvisionEngine;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, key: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(key.to_string(), data.to_vec());
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ProvisionError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    struct MockConfig {
        endpoint: String,
        timeout: Duration,
    }

    impl MockConfig {
        fn new(endpoint: String) -> Self {
            Self {
                endpoint,
                timeout: Duration::from_secs(5),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn credential(&self) -> &str {
            "test-token"
        }

        fn source_key(&self) -> &str {
            "groups.csv"
        }

        fn request_timeout(&self) -> Duration {
            self.timeout
        }
    }

    async fn pipeline_with_csv(
        server: &MockServer,
        csv: &str,
    ) -> GroupPipeline<MockStorage, MockConfig> {
        let storage = MockStorage::new();
        storage.put("groups.csv", csv.as_bytes()).await;
        let config = MockConfig::new(server.base_url());
        GroupPipeline::new(storage, config).unwrap()
    }

    #[tokio::test]
    async fn test_batch_creates_one_group_per_row() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v4/groups")
                .header("PRIVATE-TOKEN", "test-token");
            then.status(201);
        });

        let csv = "group_name,description,visibility\n\
                   Dev Team,Developers,private\n\
                   QA,Testers,internal\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let engine = ProvisionEngine::new(pipeline);

        let report = engine.run().await.unwrap();

        api_mock.assert_hits(2);
        assert_eq!(report.len(), 2);
        assert_eq!(report.created_count(), 2);
    }

    #[tokio::test]
    async fn test_request_carries_derived_path_and_payload() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v4/groups")
                .header("PRIVATE-TOKEN", "test-token")
                .json_body(serde_json::json!({
                    "name": "Dev Team",
                    "path": "dev-team",
                    "description": "Developers",
                    "visibility": "private"
                }));
            then.status(201);
        });

        let csv = "group_name,description,visibility\nDev Team,Developers,private\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let report = ProvisionEngine::new(pipeline).run().await.unwrap();

        api_mock.assert();
        assert_eq!(report.created_count(), 1);
    }

    #[tokio::test]
    async fn test_row_failure_does_not_abort_batch() {
        let server = MockServer::start();

        // One disjoint mock per row so ordering between mocks never matters.
        let names = ["One", "Two", "Three", "Four", "Five"];
        let mocks: Vec<_> = names
            .iter()
            .map(|name| {
                server.mock(|when, then| {
                    when.method(POST)
                        .path("/api/v4/groups")
                        .json_body_partial(format!(r#"{{"name": "Group {}"}}"#, name));
                    if *name == "Three" {
                        then.status(422)
                            .body(r#"{"message":"Name has already been taken"}"#);
                    } else {
                        then.status(201);
                    }
                })
            })
            .collect();

        let csv = "group_name,description,visibility\n\
                   Group One,,public\n\
                   Group Two,,public\n\
                   Group Three,,public\n\
                   Group Four,,public\n\
                   Group Five,,public\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let report = ProvisionEngine::new(pipeline).run().await.unwrap();

        for mock in &mocks {
            mock.assert();
        }
        assert_eq!(report.len(), 5);
        let outcomes: Vec<bool> = report
            .rows
            .iter()
            .map(|r| matches!(r.outcome, ProvisionOutcome::Created))
            .collect();
        assert_eq!(outcomes, vec![true, true, false, true, true]);
        match &report.rows[2].outcome {
            ProvisionOutcome::Failed { reason } => {
                assert!(reason.contains("422"));
                assert!(reason.contains("already been taken"));
            }
            ProvisionOutcome::Created => panic!("row 3 should have failed"),
        }
        // Input order is preserved in the report.
        assert_eq!(report.rows[2].row, 3);
        assert_eq!(report.rows[2].group_name, "Group Three");
    }

    #[tokio::test]
    async fn test_missing_source_aborts_before_any_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v4/groups");
            then.status(201);
        });

        let storage = MockStorage::new(); // no groups.csv
        let config = MockConfig::new(server.base_url());
        let pipeline = GroupPipeline::new(storage, config).unwrap();

        let err = ProvisionEngine::new(pipeline).run().await.unwrap_err();

        assert!(matches!(err, ProvisionError::SourceUnavailable { .. }));
        assert_eq!(api_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_missing_header_column_aborts_before_any_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v4/groups");
            then.status(201);
        });

        let csv = "group_name,description\nDev Team,Developers\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let err = ProvisionEngine::new(pipeline).run().await.unwrap_err();

        assert!(matches!(err, ProvisionError::MalformedInput { .. }));
        assert_eq!(api_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_header_only_source_yields_empty_report() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v4/groups");
            then.status(201);
        });

        let csv = "group_name,description,visibility\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let report = ProvisionEngine::new(pipeline).run().await.unwrap();

        assert!(report.is_empty());
        assert_eq!(api_mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_rejected_rows_keep_their_slot_and_skip_the_api() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v4/groups");
            then.status(201);
        });

        // Row 2 has an unknown visibility, row 3 an empty group_name.
        let csv = "group_name,description,visibility\n\
                   Dev Team,Developers,private\n\
                   Ops,Operators,secret\n\
                   ,Orphans,public\n";
        let pipeline = pipeline_with_csv(&server, csv).await;
        let report = ProvisionEngine::new(pipeline).run().await.unwrap();

        api_mock.assert_hits(1);
        assert_eq!(report.len(), 3);
        assert!(matches!(report.rows[0].outcome, ProvisionOutcome::Created));
        assert!(matches!(
            report.rows[1].outcome,
            ProvisionOutcome::Failed { .. }
        ));
        match &report.rows[2].outcome {
            ProvisionOutcome::Failed { reason } => assert_eq!(reason, "group_name is empty"),
            ProvisionOutcome::Created => panic!("row 3 should have been rejected"),
        }
    }

    #[tokio::test]
    async fn test_hanging_endpoint_becomes_a_row_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/v4/groups");
            then.status(201).delay(Duration::from_secs(2));
        });

        let storage = MockStorage::new();
        storage
            .put(
                "groups.csv",
                b"group_name,description,visibility\nDev Team,Developers,private\n",
            )
            .await;
        let config = MockConfig {
            endpoint: server.base_url(),
            timeout: Duration::from_millis(250),
        };
        let pipeline = GroupPipeline::new(storage, config).unwrap();

        let report = ProvisionEngine::new(pipeline).run().await.unwrap();

        api_mock.assert();
        assert_eq!(report.len(), 1);
        match &report.rows[0].outcome {
            ProvisionOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            ProvisionOutcome::Created => panic!("request should have timed out"),
        }
    }
}
