use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvTable;
use sqlx::sqlite::SqlitePool;

/// Append every row of a parsed CSV table to the named table, in one
/// transaction. Column names come from the CSV header and must match the
/// table schema; a mismatch fails the whole batch. Existing rows are never
/// touched (append semantics, no dedup).
pub async fn bulk_append(pool: &SqlitePool, table: &str, data: &CsvTable) -> Result<u64> {
    validate_identifier(table)?;
    for header in &data.headers {
        validate_identifier(header)?;
    }
    if data.headers.is_empty() {
        return Err(AppError::ValidationError(format!(
            "No columns to insert into '{table}'"
        )));
    }

    let columns = data
        .headers
        .iter()
        .map(|h| format!("\"{h}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; data.headers.len()].join(", ");
    let sql = format!("INSERT INTO \"{table}\" ({columns}) VALUES ({placeholders})");

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to begin transaction: {e}")))?;

    let mut affected: u64 = 0;
    for row in &data.rows {
        let mut query = sqlx::query(&sql);
        for value in row {
            query = query.bind(value);
        }
        let res = query
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert into '{table}': {e}")))?;
        affected += res.rows_affected();
    }

    tx.commit()
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to commit transaction: {e}")))?;

    Ok(affected)
}

/// Current row count of a table, for the confirmation report.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64> {
    validate_identifier(table)?;
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{table}\""))
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to count rows in '{table}': {e}")))
}

// Table and column names are interpolated into SQL, so they are restricted
// to plain identifiers.
fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Invalid SQL identifier: '{name}'"
        )))
    }
}
