use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::domain::error::Result;
use crate::domain::incident::NewIncident;
use crate::domain::report::VerificationReport;
use crate::infrastructure::db::incidents::IncidentRepository;

use super::user_service::{login_user, register_user};

const TEST_USERNAME: &str = "test_user";
const TEST_PASSWORD: &str = "TestPass123!";

/// Post-setup smoke test: register a fixed test account, log in with it,
/// and insert one sample incident. Outcomes are collected in the report;
/// duplicate handling stays in the auth outcomes.
pub struct VerificationService {
    pool: SqlitePool,
}

impl VerificationService {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn run(&self) -> Result<VerificationReport> {
        let registration =
            register_user(&self.pool, TEST_USERNAME, TEST_PASSWORD, "user").await?;
        let login = login_user(&self.pool, TEST_USERNAME, TEST_PASSWORD).await?;

        let sample = NewIncident::new(
            "2024-11-05",
            "Test Incident",
            "Low",
            "Open",
            "This is only a validation entry.",
            TEST_USERNAME,
        );
        let sample_incident_id = IncidentRepository::new(&self.pool).insert(&sample).await?;
        info!(id = sample_incident_id, "sample incident created");

        Ok(VerificationReport {
            registration,
            login,
            sample_incident_id,
        })
    }
}
