pub mod api;
pub mod calculator_results;
pub mod calculators;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod exams;
pub mod flashcards;
pub mod learning;
pub mod medications;
pub mod models;
pub mod protocols;
pub mod questions;
pub mod reference;
pub mod study_notes;

use tracing_subscriber::EnvFilter;

use crate::api::ApiContext;

/// Initialize logging, prepare the data directory and database, and
/// run the API server until shutdown.
pub async fn run() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    std::fs::create_dir_all(config::uploads_dir())?;

    let db_path = config::database_path();
    {
        // open once up front so migrations and seeding happen before
        // the first request
        let conn = db::open_database(&db_path).map_err(std::io::Error::other)?;
        if let Some(report) = db::seed::seed_if_empty(&conn).map_err(std::io::Error::other)? {
            tracing::info!(
                medications = report.medications,
                protocols = report.protocols,
                questions = report.questions,
                "seeded reference data"
            );
        }
    }

    let ctx = ApiContext::new(db_path, config::uploads_dir());
    let listener = tokio::net::TcpListener::bind(config::listen_addr()).await?;
    let mut server = api::start_server(listener, ctx)?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    server.shutdown();
    server.wait().await;
    Ok(())
}
