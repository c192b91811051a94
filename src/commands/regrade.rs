//! Regrade command - Recomputes stored grades after a threshold change.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Execute the regrade command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let services = Services::from_connection(db.get_connection(), &config);
    let report = services.marks().regrade_all().await?;

    println!(
        "Regraded {} of {} performance records",
        report.updated, report.examined
    );
    Ok(())
}
