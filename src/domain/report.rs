use serde::{Deserialize, Serialize};

use super::user::AuthOutcome;

/// Rows appended to one table from one seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetLoad {
    pub table: String,
    pub rows_inserted: u64,
}

/// Current row count of one table, for the confirmation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub rows: i64,
}

/// Structured outcome of the full database setup pass. The presentation
/// layer decides how to display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupReport {
    pub migrated_users: usize,
    pub dataset_loads: Vec<DatasetLoad>,
    pub total_rows_imported: u64,
    pub table_counts: Vec<TableCount>,
}

impl SetupReport {
    pub fn count_for(&self, table: &str) -> Option<i64> {
        self.table_counts
            .iter()
            .find(|c| c.table == table)
            .map(|c| c.rows)
    }
}

/// Structured outcome of the post-setup smoke test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub registration: AuthOutcome,
    pub login: AuthOutcome,
    pub sample_incident_id: i64,
}
