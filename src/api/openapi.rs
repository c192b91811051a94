//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{enrollment_handler, marks_handler, progress_handler};
use crate::domain::{
    ActivityEntry, CourseProgress, EligibilityCheck, Eligibility, EnrollStudent, EnrolledModule,
    EnrollmentOutcome, Grade, MarkEntry, MarksRecorded, MarksRetracted, ModuleStatus,
    PerformanceSummary, RecordMarks, RegisteredModule,
};
use crate::types::{MarksRecordedResponse, PaginatedMarks, PaginationMeta};

/// OpenAPI documentation for the enrollment and marks API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vocational College API",
        version = "0.1.0",
        description = "Course enrollment, module registration and marks entry for a vocational college"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Enrollment endpoints
        enrollment_handler::enroll,
        enrollment_handler::check_eligibility,
        // Marks endpoints
        marks_handler::record_marks,
        marks_handler::retract_marks,
        marks_handler::list_marks,
        // Progress endpoints
        progress_handler::enrolled_modules,
        progress_handler::course_progress,
        progress_handler::registered_modules,
        progress_handler::registered_modules_in_level,
        progress_handler::performance_summary,
        progress_handler::recent_activity,
    ),
    components(
        schemas(
            // Domain types
            Grade,
            ModuleStatus,
            EnrollStudent,
            EligibilityCheck,
            Eligibility,
            EnrollmentOutcome,
            RecordMarks,
            MarksRecorded,
            MarksRetracted,
            MarkEntry,
            EnrolledModule,
            RegisteredModule,
            CourseProgress,
            PerformanceSummary,
            ActivityEntry,
            // Response wrappers
            PaginationMeta,
            PaginatedMarks,
            MarksRecordedResponse,
            enrollment_handler::EnrollmentCreated,
            marks_handler::MarksRetractedResponse,
        )
    ),
    tags(
        (name = "Enrollments", description = "Enrollment guard and module registration"),
        (name = "Marks", description = "Marks entry, listing and retraction"),
        (name = "Progress", description = "Read-only progress reports")
    )
)]
pub struct ApiDoc;
