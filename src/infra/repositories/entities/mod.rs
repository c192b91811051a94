//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod activity;
pub mod course;
pub mod enrollment;
pub mod level;
pub mod module;
pub mod student;
pub mod student_module;
pub mod student_performance;
