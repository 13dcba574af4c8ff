use tracing::error;

use secdesk::application::{SeedService, VerificationService};
use secdesk::domain::error::Result;
use secdesk::domain::incident::{Incident, NewIncident};
use secdesk::domain::report::{SetupReport, VerificationReport};
use secdesk::infrastructure::config::SeedConfig;
use secdesk::infrastructure::db::connection::connect_pool;
use secdesk::infrastructure::db::incidents::IncidentRepository;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        error!(error = %err, "run failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = SeedConfig::from_env();

    println!("======================================");
    println!("   SECDESK - DATABASE SEED & VERIFY   ");
    println!("======================================");

    println!("\n=== INITIALIZING FULL DATABASE SETUP ===");
    let pool = connect_pool(&config.database_path).await?;
    println!("Database connection established.");

    let setup_report = SeedService::new(&pool, config).run().await?;
    print_setup_report(&setup_report);
    println!("=== DATABASE SETUP COMPLETED ===");

    println!("\n===== STARTING SYSTEM VERIFICATION TESTS =====");
    let verification = VerificationService::new(&pool).run().await?;
    print_verification_report(&verification);

    println!("\n=== ADDING STANDARD INCIDENT EXAMPLE ===");
    let incidents = IncidentRepository::new(&pool);
    let demo = NewIncident::new(
        "2024-11-10",
        "Phishing Attempt",
        "High",
        "Open",
        "User interacted with a suspicious hyperlink.",
        "alice",
    );
    let demo_id = incidents.insert(&demo).await?;
    println!("Incident successfully saved with ID: {demo_id}");

    println!("\n=== DISPLAYING ALL INCIDENT RECORDS ===");
    print_incidents(&incidents.get_all().await?);

    pool.close().await;
    Ok(())
}

fn print_setup_report(report: &SetupReport) {
    println!("All required tables have been created.");
    println!(
        "{} user records imported from text file.",
        report.migrated_users
    );
    for load in &report.dataset_loads {
        println!(
            "[DATA] {} entries inserted into '{}'",
            load.rows_inserted, load.table
        );
    }
    println!(
        "Imported a total of {} rows from all CSV files.",
        report.total_rows_imported
    );

    println!("\n--- TABLE COUNT REPORT ---");
    for count in &report.table_counts {
        println!("Table '{}': {} rows", count.table, count.rows);
    }
}

fn print_verification_report(report: &VerificationReport) {
    println!("[USER SIGNUP] {}", report.registration.message);
    println!("[USER LOGIN] {}", report.login.message);
    println!(
        "Sample incident created with ID: {}",
        report.sample_incident_id
    );
}

fn print_incidents(incidents: &[Incident]) {
    if incidents.is_empty() {
        println!("(no incident records)");
        return;
    }
    for incident in incidents {
        println!(
            "#{} [{}] {} - severity: {}, status: {}, reported by: {}",
            incident.id.unwrap_or(0),
            incident.date,
            incident.title,
            incident.severity,
            incident.status,
            incident.reported_by.as_deref().unwrap_or("unknown"),
        );
    }
}
