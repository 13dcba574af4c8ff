use serde::{Deserialize, Serialize};

/// An IT help-desk ticket, stored in `it_tickets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Option<i64>,
    pub opened_date: String,
    pub summary: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
}
