//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: grade rules, lifecycle states, request/response types.

pub mod activity;
pub mod enrollment;
pub mod grade;
pub mod performance;
pub mod status;
pub mod student;

pub use activity::{ActivityEntry, NewActivity};
pub use enrollment::{
    EligibilityCheck, Eligibility, EnrollStudent, EnrollmentDecision, EnrollmentOutcome, GuardScope,
    ModuleRegistration, NewEnrollment, RegisteredModule,
};
pub use grade::{Grade, MarkSheet};
pub use performance::{
    CourseProgress, EnrolledModule, MarkEntry, MarksFilter, MarksRecorded, MarksRetracted,
    PerformanceRecord, PerformanceSummary, RecordMarks, RegradeReport,
};
pub use status::{EnrollmentStatus, ModuleStatus};
pub use student::{Course, Module, Student};
