//! Migrate command - Schema management for the college database.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            let pending = pending_count(&db).await?;
            db.run_migrations().await?;
            tracing::info!(applied = pending, "Migrations completed");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for migration in db.migration_status().await? {
                let state = if migration.applied { "applied" } else { "pending" };
                println!("{:<55} {}", migration.name, state);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all enrollment, module and marks tables");
            db.fresh_migrations().await?;
            tracing::info!("Schema recreated from scratch");
        }
    }

    Ok(())
}

async fn pending_count(db: &Database) -> AppResult<usize> {
    let status = db.migration_status().await?;
    Ok(status.iter().filter(|m| !m.applied).count())
}
