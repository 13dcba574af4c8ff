use std::path::Path;

use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::domain::error::Result;
use crate::domain::report::{DatasetLoad, SetupReport, TableCount};
use crate::infrastructure::config::SeedConfig;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::db::bulk::{bulk_append, count_rows};
use crate::infrastructure::db::connection::create_all_tables;

use super::user_service::migrate_users_from_file;

/// Tables covered by the confirmation report after seeding.
pub const REPORT_TABLES: [&str; 4] =
    ["users", "cyber_incidents", "datasets_metadata", "it_tickets"];

/// Read one CSV file and append its contents to a database table. A missing
/// file is not an error: it is logged and counted as zero rows. Parse and
/// insert failures propagate and abort the run.
pub async fn load_csv_to_table(pool: &SqlitePool, csv_file: &Path, table: &str) -> Result<u64> {
    if !csv_file.exists() {
        info!(file = %csv_file.display(), "seed file missing, skipping");
        return Ok(0);
    }

    let data = CsvParser::new().parse_file(csv_file)?;
    let inserted = bulk_append(pool, table, &data).await?;
    info!(table, rows = inserted, "seed rows inserted");
    Ok(inserted)
}

/// Brings the database from nonexistent/partial to fully seeded in one
/// pass: ensure schema, import legacy users, bulk-load every configured CSV
/// file, then collect the per-table row counts for the report.
pub struct SeedService {
    pool: SqlitePool,
    config: SeedConfig,
}

impl SeedService {
    pub fn new(pool: &SqlitePool, config: SeedConfig) -> Self {
        Self {
            pool: pool.clone(),
            config,
        }
    }

    pub async fn run(&self) -> Result<SetupReport> {
        create_all_tables(&self.pool).await?;
        info!("all required tables are present");

        let migrated_users =
            migrate_users_from_file(&self.pool, &self.config.legacy_users_file).await?;
        info!(count = migrated_users, "legacy user records imported");

        let mut dataset_loads = Vec::with_capacity(self.config.datasets.len());
        let mut total_rows_imported: u64 = 0;
        for mapping in &self.config.datasets {
            let rows_inserted = load_csv_to_table(&self.pool, &mapping.file, &mapping.table).await?;
            total_rows_imported += rows_inserted;
            dataset_loads.push(DatasetLoad {
                table: mapping.table.clone(),
                rows_inserted,
            });
        }

        let mut table_counts = Vec::with_capacity(REPORT_TABLES.len());
        for table in REPORT_TABLES {
            table_counts.push(TableCount {
                table: table.to_string(),
                rows: count_rows(&self.pool, table).await?,
            });
        }

        Ok(SetupReport {
            migrated_users,
            dataset_loads,
            total_rows_imported,
            table_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::DatasetMapping;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::path::PathBuf;
    use uuid::Uuid;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    fn temp_data_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("secdesk-seed-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_incident_csv(dir: &Path) -> PathBuf {
        let file = dir.join("cyber_incidents.csv");
        std::fs::write(
            &file,
            "date,title,severity,status,description,reported_by\n\
             2024-10-01,Port scan,Low,Closed,Routine scan detected,carol\n\
             2024-10-02,Ransomware note,Critical,Open,Encrypted file share,dave\n",
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_file_loads_zero_rows() {
        let pool = memory_pool().await;
        create_all_tables(&pool).await.unwrap();

        let before = count_rows(&pool, "cyber_incidents").await.unwrap();
        let missing = std::env::temp_dir().join(format!("secdesk-none-{}.csv", Uuid::new_v4()));
        let loaded = load_csv_to_table(&pool, &missing, "cyber_incidents")
            .await
            .unwrap();

        assert_eq!(loaded, 0);
        assert_eq!(count_rows(&pool, "cyber_incidents").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_load_increases_count_by_row_count() {
        let pool = memory_pool().await;
        create_all_tables(&pool).await.unwrap();
        let dir = temp_data_dir();
        let file = write_incident_csv(&dir);

        let loaded = load_csv_to_table(&pool, &file, "cyber_incidents")
            .await
            .unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(count_rows(&pool, "cyber_incidents").await.unwrap(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_full_seed_run_produces_report() {
        let pool = memory_pool().await;
        let dir = temp_data_dir();
        write_incident_csv(&dir);
        std::fs::write(
            dir.join("legacy_users.txt"),
            "alice,alicepw,admin\nbob,bobpw,user\n",
        )
        .unwrap();

        let config = SeedConfig::new(dir.join("seed.db"), &dir);
        let report = SeedService::new(&pool, config).run().await.unwrap();

        assert_eq!(report.migrated_users, 2);
        assert_eq!(report.total_rows_imported, 2);
        assert_eq!(report.count_for("users"), Some(2));
        assert_eq!(report.count_for("cyber_incidents"), Some(2));
        // The other two seed files are absent, skipped independently.
        assert_eq!(report.count_for("datasets_metadata"), Some(0));
        assert_eq!(report.count_for("it_tickets"), Some(0));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_repeated_seed_run_duplicates_csv_rows() {
        // Bulk append has no uniqueness constraint: a second run doubles the
        // CSV-derived rows, while the user migration stays duplicate-safe.
        let pool = memory_pool().await;
        let dir = temp_data_dir();
        write_incident_csv(&dir);
        std::fs::write(dir.join("legacy_users.txt"), "alice,alicepw,admin\n").unwrap();

        let config = SeedConfig::new(dir.join("seed.db"), &dir);
        let service = SeedService::new(&pool, config);

        let first = service.run().await.unwrap();
        let second = service.run().await.unwrap();

        assert_eq!(
            second.count_for("cyber_incidents"),
            first.count_for("cyber_incidents").map(|c| c * 2)
        );
        assert_eq!(second.migrated_users, 0);
        assert_eq!(second.count_for("users"), first.count_for("users"));

        // Counts never decrease across runs.
        for count in &second.table_counts {
            assert!(count.rows >= first.count_for(&count.table).unwrap());
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_custom_mapping_is_respected() {
        let pool = memory_pool().await;
        let dir = temp_data_dir();
        let file = dir.join("tickets.csv");
        std::fs::write(
            &file,
            "opened_date,summary,priority,status\n2024-11-03,VPN access,Medium,Open\n",
        )
        .unwrap();

        let mut config = SeedConfig::new(dir.join("seed.db"), &dir);
        config.datasets = vec![DatasetMapping {
            table: "it_tickets".into(),
            file,
        }];

        let report = SeedService::new(&pool, config).run().await.unwrap();
        assert_eq!(report.count_for("it_tickets"), Some(1));

        std::fs::remove_dir_all(&dir).ok();
    }
}
