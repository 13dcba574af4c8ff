use crate::domain::dataset::DatasetMetadata;
use crate::domain::error::{AppError, Result};
use sqlx::sqlite::SqlitePool;

pub struct DatasetRepository {
    pool: SqlitePool,
}

impl DatasetRepository {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn insert(&self, dataset: &DatasetMetadata) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO datasets_metadata (name, source, category, last_updated) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&dataset.name)
        .bind(&dataset.source)
        .bind(&dataset.category)
        .bind(&dataset.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert dataset metadata: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> Result<Vec<DatasetMetadata>> {
        let rows = sqlx::query_as::<_, DatasetEntity>(
            "SELECT id, name, source, category, last_updated FROM datasets_metadata ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch dataset metadata: {e}")))?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM datasets_metadata")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count dataset metadata: {e}")))
    }
}

#[derive(sqlx::FromRow)]
struct DatasetEntity {
    id: i64,
    name: String,
    source: Option<String>,
    category: Option<String>,
    last_updated: Option<String>,
}

impl From<DatasetEntity> for DatasetMetadata {
    fn from(e: DatasetEntity) -> Self {
        Self {
            id: Some(e.id),
            name: e.name,
            source: e.source,
            category: e.category,
            last_updated: e.last_updated,
        }
    }
}
