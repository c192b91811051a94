//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    EnrollmentService, MarksService, ProgressService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Enrollment guard and module registration
    pub enrollment_service: Arc<dyn EnrollmentService>,
    /// Marks entry and retraction
    pub marks_service: Arc<dyn MarksService>,
    /// Read-only progress reports
    pub progress_service: Arc<dyn ProgressService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Create application state from any service container.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            enrollment_service: container.enrollments(),
            marks_service: container.marks(),
            progress_service: container.progress(),
            database,
        }
    }
}
