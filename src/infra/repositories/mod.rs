//! Repository layer - Data access abstraction
//!
//! Workflow repositories (`Tx*`) borrow a transaction from the unit of work.
//! Reporting reads go through [`ProgressRepository`] on the pool.

mod activity_repository;
mod catalog_repository;
pub(crate) mod entities;
mod enrollment_repository;
mod performance_repository;
mod progress_repository;

pub use activity_repository::TxActivityRepository;
pub use catalog_repository::TxCatalogRepository;
pub use enrollment_repository::TxEnrollmentRepository;
pub use performance_repository::TxPerformanceRepository;
pub use progress_repository::{ProgressRepository, ProgressStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use progress_repository::MockProgressRepository;
