use std::env;
use std::path::{Path, PathBuf};

/// One {source file, target table} pair for the bulk CSV import.
#[derive(Debug, Clone)]
pub struct DatasetMapping {
    pub table: String,
    pub file: PathBuf,
}

/// Runtime configuration for the seeding run. Paths default to the legacy
/// layout (`secdesk.db` next to the binary, seed files under `DATA/`) but
/// can be overridden through the environment so tests can point everything
/// at temporary locations.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub database_path: PathBuf,
    pub data_dir: PathBuf,
    pub legacy_users_file: PathBuf,
    pub datasets: Vec<DatasetMapping>,
}

const SEED_TABLES: [&str; 3] = ["cyber_incidents", "datasets_metadata", "it_tickets"];

impl SeedConfig {
    /// Build a config rooted at the given database path and data directory.
    pub fn new(database_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            database_path: database_path.into(),
            legacy_users_file: data_dir.join("legacy_users.txt"),
            datasets: default_mappings(&data_dir),
            data_dir,
        }
    }

    /// Read overrides from `SECDESK_DB_PATH` and `SECDESK_DATA_DIR`.
    pub fn from_env() -> Self {
        let database_path = env::var("SECDESK_DB_PATH").unwrap_or_else(|_| "secdesk.db".into());
        let data_dir = env::var("SECDESK_DATA_DIR").unwrap_or_else(|_| "DATA".into());
        Self::new(database_path, data_dir)
    }
}

fn default_mappings(data_dir: &Path) -> Vec<DatasetMapping> {
    SEED_TABLES
        .iter()
        .map(|table| DatasetMapping {
            table: table.to_string(),
            file: data_dir.join(format!("{table}.csv")),
        })
        .collect()
}
