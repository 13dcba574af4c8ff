use crate::domain::error::{AppError, Result};
use crate::domain::user::User;
use sqlx::sqlite::SqlitePool;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn insert(&self, username: &str, password_hash: &str, role: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert user: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    /// Insert unless the username already exists. Returns 1 when a row was
    /// written, 0 when the duplicate was skipped.
    pub async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, password_hash, role) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to import user: {e}")))?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserEntity>(
            "SELECT id, username, role, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch user: {e}")))?;

        Ok(row.map(|e| e.into()))
    }

    pub async fn password_hash(&self, username: &str) -> Result<Option<String>> {
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to fetch password hash: {e}")))
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count users: {e}")))
    }
}

#[derive(sqlx::FromRow)]
struct UserEntity {
    id: i64,
    username: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: Some(e.id),
            username: e.username,
            role: e.role,
            created_at: Some(e.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::create_all_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> UserRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();
        UserRepository::new(&pool)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;
        repo.insert("alice", "hash", "admin").await.unwrap();

        let user = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "admin");
        assert!(user.id.is_some());

        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_if_absent_skips_duplicates() {
        let repo = repo().await;
        assert_eq!(repo.insert_if_absent("alice", "h1", "user").await.unwrap(), 1);
        assert_eq!(repo.insert_if_absent("alice", "h2", "user").await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 1);

        // The original hash survives the skipped duplicate.
        let hash = repo.password_hash("alice").await.unwrap().unwrap();
        assert_eq!(hash, "h1");
    }
}
