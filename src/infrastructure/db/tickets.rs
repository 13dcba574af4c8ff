use crate::domain::error::{AppError, Result};
use crate::domain::ticket::Ticket;
use sqlx::sqlite::SqlitePool;

pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    pub async fn insert(&self, ticket: &Ticket) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO it_tickets (opened_date, summary, priority, status, assigned_to) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&ticket.opened_date)
        .bind(&ticket.summary)
        .bind(&ticket.priority)
        .bind(&ticket.status)
        .bind(&ticket.assigned_to)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to insert ticket: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_all(&self) -> Result<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, TicketEntity>(
            "SELECT id, opened_date, summary, priority, status, assigned_to \
             FROM it_tickets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch tickets: {e}")))?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM it_tickets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to count tickets: {e}")))
    }
}

#[derive(sqlx::FromRow)]
struct TicketEntity {
    id: i64,
    opened_date: String,
    summary: String,
    priority: String,
    status: String,
    assigned_to: Option<String>,
}

impl From<TicketEntity> for Ticket {
    fn from(e: TicketEntity) -> Self {
        Self {
            id: Some(e.id),
            opened_date: e.opened_date,
            summary: e.summary,
            priority: e.priority,
            status: e.status,
            assigned_to: e.assigned_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection::create_all_tables;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_insert_and_list_tickets() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_all_tables(&pool).await.unwrap();
        let repo = TicketRepository::new(&pool);

        let id = repo
            .insert(&Ticket {
                id: None,
                opened_date: "2024-11-03".into(),
                summary: "VPN access request".into(),
                priority: "Medium".into(),
                status: "Open".into(),
                assigned_to: Some("bob".into()),
            })
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, Some(id));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
