//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.
//!
//! All services share one `Persistence` unit of work, and through it
//! one connection pool.

use std::sync::Arc;

use super::{EnrollmentService, MarksService, ProgressService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get enrollment service
    fn enrollments(&self) -> Arc<dyn EnrollmentService>;

    /// Get marks service
    fn marks(&self) -> Arc<dyn MarksService>;

    /// Get progress reporting service
    fn progress(&self) -> Arc<dyn ProgressService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    enrollment_service: Arc<dyn EnrollmentService>,
    marks_service: Arc<dyn MarksService>,
    progress_service: Arc<dyn ProgressService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        enrollment_service: Arc<dyn EnrollmentService>,
        marks_service: Arc<dyn MarksService>,
        progress_service: Arc<dyn ProgressService>,
    ) -> Self {
        Self {
            enrollment_service,
            marks_service,
            progress_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        use super::{EnrollmentManager, MarksRecorder, ProgressReporter};

        let uow = Arc::new(Persistence::new(db));
        let enrollment_service = Arc::new(EnrollmentManager::new(
            uow.clone(),
            config.enrollment_guard_scope,
        ));
        let marks_service = Arc::new(MarksRecorder::new(uow.clone()));
        let progress_service = Arc::new(ProgressReporter::new(uow));

        Self {
            enrollment_service,
            marks_service,
            progress_service,
        }
    }
}

impl ServiceContainer for Services {
    fn enrollments(&self) -> Arc<dyn EnrollmentService> {
        self.enrollment_service.clone()
    }

    fn marks(&self) -> Arc<dyn MarksService> {
        self.marks_service.clone()
    }

    fn progress(&self) -> Arc<dyn ProgressService> {
        self.progress_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockEnrollmentService, MockMarksService, MockProgressService};

    #[test]
    fn test_container_hands_out_injected_services() {
        let enrollments: Arc<dyn EnrollmentService> = Arc::new(MockEnrollmentService::new());
        let services = Services::new(
            enrollments.clone(),
            Arc::new(MockMarksService::new()),
            Arc::new(MockProgressService::new()),
        );

        assert!(Arc::ptr_eq(&services.enrollments(), &enrollments));
    }
}
