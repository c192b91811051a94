//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod container;
pub mod enrollment_guard;
mod enrollment_service;
mod marks_service;
mod progress_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use enrollment_service::{EnrollmentManager, EnrollmentService};
pub use marks_service::{MarksRecorder, MarksService};
pub use progress_service::{ProgressReporter, ProgressService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use enrollment_service::MockEnrollmentService;
#[cfg(any(test, feature = "test-utils"))]
pub use marks_service::MockMarksService;
#[cfg(any(test, feature = "test-utils"))]
pub use progress_service::MockProgressService;
