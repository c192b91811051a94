//! HTTP request handlers.

pub mod enrollment_handler;
pub mod marks_handler;
pub mod progress_handler;

pub use enrollment_handler::enrollment_routes;
pub use marks_handler::marks_routes;
pub use progress_handler::{
    activity_routes, performance_routes, registration_routes, student_progress_routes,
};
