use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visibility levels accepted by the group-management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// One parsed data row of the source sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupRecord {
    pub group_name: String,
    #[serde(default)]
    pub description: String,
    pub visibility: Visibility,
}

impl GroupRecord {
    /// URL slug derived from the group name. Never stored, always recomputed,
    /// so it cannot drift from `group_name`.
    pub fn path(&self) -> String {
        self.group_name.to_lowercase().replace(' ', "-")
    }

    pub fn payload(&self) -> GroupPayload {
        GroupPayload {
            name: self.group_name.clone(),
            path: self.path(),
            description: self.description.clone(),
            visibility: self.visibility,
        }
    }
}

/// Wire body for `POST /api/v4/groups`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupPayload {
    pub name: String,
    pub path: String,
    pub description: String,
    pub visibility: Visibility,
}

/// One slot of the batch. Rejected rows keep their slot so the report stays
/// aligned with the input.
#[derive(Debug, Clone)]
pub struct GroupRow {
    /// 1-based data row index; the header row does not count.
    pub row: usize,
    /// Best-effort group name for logging; empty when the row was unreadable.
    pub group_name: String,
    pub state: RowState,
}

#[derive(Debug, Clone)]
pub enum RowState {
    Ready(GroupRecord),
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProvisionOutcome {
    Created,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub row: usize,
    pub group_name: String,
    #[serde(flatten)]
    pub outcome: ProvisionOutcome,
}

/// Ordered per-row outcomes for one provisioning run, one entry per input
/// data row, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub rows: Vec<RowResult>,
}

impl BatchReport {
    pub fn created_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, ProvisionOutcome::Created))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.rows.len() - self.created_count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
