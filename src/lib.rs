//! Vocational college API - enrollment, module progression and marks entry
//!
//! A student enrolls in a course and registers modules. Marks are entered
//! per module, graded centrally, and finalize the registration as
//! `Completed` or `Failed`. A student with unfinished modules cannot enroll
//! again until those modules are settled.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Grade rules, lifecycle states and request types
//! - **services**: Enrollment guard, marks recording and progress reports
//! - **infra**: Database, repositories and the unit of work
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Recompute stored grades
//! cargo run -- regrade
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Grade, ModuleStatus};
pub use errors::{AppError, AppResult};
