use serde::{Deserialize, Serialize};

/// Catalog entry for an imported dataset, stored in `datasets_metadata`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub id: Option<i64>,
    pub name: String,
    pub source: Option<String>,
    pub category: Option<String>,
    pub last_updated: Option<String>,
}
