//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `regrade` - Recompute stored grades

pub mod args;

pub use args::{Cli, Commands};
