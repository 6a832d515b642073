use crate::domain::model::{GroupRecord, GroupRow, RowState};
use crate::utils::error::{ProvisionError, Result};

/// Columns the header row must carry, by name. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &["group_name", "description", "visibility"];

/// Parses the raw source bytes into one `GroupRow` per data row, in input
/// order. The header is validated before any data row is touched: a missing
/// required column is `MalformedInput` even for a header-only file. A bad
/// data row (missing field, invalid UTF-8, unknown visibility) keeps its
/// slot and is marked rejected.
pub fn parse_rows(raw: &[u8]) -> Result<Vec<GroupRow>> {
    let mut reader = csv::Reader::from_reader(raw);

    let headers = reader
        .headers()
        .map_err(|e| ProvisionError::malformed_input(format!("unreadable header row: {}", e)))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(ProvisionError::malformed_input(format!(
                "header is missing required column '{}'",
                column
            )));
        }
    }

    let name_index = headers.iter().position(|h| h == "group_name");

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        match record {
            Ok(record) => {
                let group_name = name_index
                    .and_then(|idx| record.get(idx))
                    .unwrap_or("")
                    .to_string();
                let state = match record.deserialize::<GroupRecord>(Some(&headers)) {
                    Ok(parsed) => RowState::Ready(parsed),
                    Err(e) => {
                        tracing::warn!("⚠️ Row {} cannot be parsed: {}", row, e);
                        RowState::Rejected {
                            reason: format!("row cannot be parsed: {}", e),
                        }
                    }
                };
                rows.push(GroupRow {
                    row,
                    group_name,
                    state,
                });
            }
            Err(e) => {
                tracing::warn!("⚠️ Row {} is unreadable: {}", row, e);
                rows.push(GroupRow {
                    row,
                    group_name: String::new(),
                    state: RowState::Rejected {
                        reason: format!("unreadable row: {}", e),
                    },
                });
            }
        }
    }

    Ok(rows)
}
