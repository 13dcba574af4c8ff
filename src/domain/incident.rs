use serde::{Deserialize, Serialize};

/// A security incident as stored in the `cyber_incidents` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: Option<i64>,
    pub date: String,
    pub title: String,
    pub severity: String,
    pub status: String,
    pub description: Option<String>,
    pub reported_by: Option<String>,
}

/// Input for a new incident; the store assigns the id on insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
    pub date: String,
    pub title: String,
    pub severity: String,
    pub status: String,
    pub description: String,
    pub reported_by: String,
}

impl NewIncident {
    pub fn new(
        date: &str,
        title: &str,
        severity: &str,
        status: &str,
        description: &str,
        reported_by: &str,
    ) -> Self {
        Self {
            date: date.to_string(),
            title: title.to_string(),
            severity: severity.to_string(),
            status: status.to_string(),
            description: description.to_string(),
            reported_by: reported_by.to_string(),
        }
    }
}
