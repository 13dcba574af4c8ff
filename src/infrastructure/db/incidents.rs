use crate::domain::error::{AppError, Result};
use crate::domain::incident::{Incident, NewIncident};
use sqlx::sqlite::SqlitePool;

pub struct IncidentRepository {
    pool: SqlitePool,
}

impl IncidentRepository {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Insert one incident and return the id assigned by the store.
    pub async fn insert(&self, incident: &NewIncident) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO cyber_incidents (date, title, severity, status, description, reported_by) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&incident.date)
        .bind(&incident.title)
        .bind(&incident.severity)
        .bind(&incident.status)
        .bind(&incident.description)
        .bind(&incident.reported_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert incident: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> Result<Vec<Incident>> {
        let rows = sqlx::query_as::<_, IncidentEntity>(
            "SELECT id, date, title, severity, status, description, reported_by \
             FROM cyber_incidents ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch incidents: {e}")))?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Incident> {
        let row = sqlx::query_as::<_, IncidentEntity>(
            "SELECT id, date, title, severity, status, description, reported_by \
             FROM cyber_incidents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch incident: {e}")))?;

        match row {
            Some(entity) => Ok(entity.into()),
            None => Err(AppError::NotFound(format!("Incident not found: {id}"))),
        }
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cyber_incidents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count incidents: {e}")))
    }
}

#[derive(sqlx::FromRow)]
struct IncidentEntity {
    id: i64,
    date: String,
    title: String,
    severity: String,
    status: String,
    description: Option<String>,
    reported_by: Option<String>,
}

impl From<IncidentEntity> for Incident {
    fn from(e: IncidentEntity) -> Self {
        Self {
            id: Some(e.id),
            date: e.date,
            title: e.title,
            severity: e.severity,
            status: e.status,
            description: e.description,
            reported_by: e.reported_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::create_all_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> IncidentRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();
        IncidentRepository::new(&pool)
    }

    #[tokio::test]
    async fn test_inserted_incident_appears_in_get_all() {
        let repo = repo().await;
        let incident = NewIncident::new(
            "2024-11-10",
            "Phishing Attempt",
            "High",
            "Open",
            "User interacted with a suspicious hyperlink.",
            "alice",
        );

        let id = repo.insert(&incident).await.unwrap();
        assert!(id > 0);

        let all = repo.get_all().await.unwrap();
        assert!(all.iter().any(|i| i.id == Some(id)));

        let fetched = repo.get(id).await.unwrap();
        assert_eq!(fetched.title, "Phishing Attempt");
        assert_eq!(fetched.reported_by.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_get_missing_incident_is_not_found() {
        let repo = repo().await;
        let err = repo.get(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
