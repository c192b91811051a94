//! Marks entry and performance reporting types.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::enrollment::{present_id, present_text};
use super::grade::{Grade, MarkSheet};
use super::status::ModuleStatus;
use crate::config::MSG_MISSING_MARKS_FIELDS;
use crate::errors::{AppError, AppResult};

/// Marks entry for one student and module
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecordMarks {
    #[schema(example = "VTC-2024-0001")]
    pub student_id: Option<String>,
    #[schema(example = 11)]
    pub module_id: Option<i32>,
    #[schema(example = 30, minimum = 0, maximum = 50)]
    pub theory_marks: Option<i32>,
    #[schema(example = 25, minimum = 0, maximum = 50)]
    pub practical_marks: Option<i32>,
}

impl RecordMarks {
    /// Presence check followed by the marks range check, in that order.
    pub fn require(self) -> AppResult<(String, i32, MarkSheet)> {
        let (Some(student_id), Some(module_id), Some(theory), Some(practical)) = (
            present_text(self.student_id),
            present_id(self.module_id),
            self.theory_marks,
            self.practical_marks,
        ) else {
            return Err(AppError::validation(MSG_MISSING_MARKS_FIELDS));
        };

        let sheet = MarkSheet::new(theory, practical)?;
        Ok((student_id, module_id, sheet))
    }
}

/// Marks as recorded, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MarksRecorded {
    pub student_id: String,
    pub module_id: i32,
    pub theory_marks: i32,
    pub practical_marks: i32,
    pub total: i32,
    pub grade: Grade,
    pub module_title: String,
    pub new_status: ModuleStatus,
}

/// Summary of a marks retraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MarksRetracted {
    /// Student full name
    pub student: String,
    /// Module title
    pub module: String,
    pub marks_deleted: bool,
    pub status_reset: bool,
}

/// Outcome of recomputing every stored grade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegradeReport {
    pub examined: usize,
    pub updated: usize,
}

/// Stored performance row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceRecord {
    pub id: i32,
    pub student_id: String,
    pub module_id: i32,
    pub theory_marks: i32,
    pub practical_marks: i32,
    pub grade: Option<Grade>,
}

impl PerformanceRecord {
    pub fn total(&self) -> i32 {
        self.theory_marks + self.practical_marks
    }
}

/// Filters for the marks listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MarksFilter {
    /// Only marks of this student
    pub student_id: Option<String>,
    /// Only marks of this module
    pub module_id: Option<i32>,
}

/// Marks listing row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MarkEntry {
    pub id: i32,
    pub student_id: String,
    pub module_id: i32,
    pub theory_marks: i32,
    pub practical_marks: i32,
    pub total: i32,
    pub grade: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<i32>,
    pub module_title: String,
    pub module_code: String,
    pub level_name: String,
    pub course_name: String,
    /// Current status of the student's module registration, if any
    pub enrollment_status: Option<String>,
}

/// Module a student is registered for, with marks when entered
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EnrolledModule {
    pub id: i32,
    pub title: String,
    pub code: String,
    pub level_name: String,
    pub level_order: i32,
    pub enrollment_status: String,
    pub grade: Option<String>,
    pub theory_marks: Option<i32>,
    pub practical_marks: Option<i32>,
    pub marks_id: Option<i32>,
    pub marks_entered: bool,
    pub course_name: String,
}

/// Module progress within one active course enrollment
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseProgress {
    pub course_id: i32,
    pub course_name: String,
    pub total_enrolled_modules: u64,
    pub completed_modules: u64,
    pub failed_modules: u64,
    pub pending_modules: u64,
    /// Percentage of registered modules completed, two decimals
    pub completion_rate: f64,
}

impl CourseProgress {
    /// Tally module statuses of one course.
    pub fn tally(
        course_id: i32,
        course_name: String,
        statuses: impl IntoIterator<Item = ModuleStatus>,
    ) -> Self {
        let mut progress = CourseProgress {
            course_id,
            course_name,
            total_enrolled_modules: 0,
            completed_modules: 0,
            failed_modules: 0,
            pending_modules: 0,
            completion_rate: 0.0,
        };

        for status in statuses {
            progress.total_enrolled_modules += 1;
            match status {
                ModuleStatus::Completed => progress.completed_modules += 1,
                ModuleStatus::Failed => progress.failed_modules += 1,
                ModuleStatus::Enrolled | ModuleStatus::Ongoing => progress.pending_modules += 1,
            }
        }

        if progress.total_enrolled_modules > 0 {
            let rate =
                progress.completed_modules as f64 * 100.0 / progress.total_enrolled_modules as f64;
            progress.completion_rate = (rate * 100.0).round() / 100.0;
        }

        progress
    }
}

/// College-wide performance distribution
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PerformanceSummary {
    pub total_students_assessed: u64,
    pub total_assessments: u64,
    /// Mean of theory + practical, two decimals
    pub average_score: f64,
    pub distinctions: u64,
    pub credits: u64,
    pub passes: u64,
    pub fails: u64,
}

impl PerformanceSummary {
    /// Aggregate stored records, bucketing totals with [`Grade::from_total`].
    pub fn from_records(records: &[PerformanceRecord]) -> Self {
        let mut students: Vec<&str> = records.iter().map(|r| r.student_id.as_str()).collect();
        students.sort_unstable();
        students.dedup();

        let mut summary = PerformanceSummary {
            total_students_assessed: students.len() as u64,
            total_assessments: records.len() as u64,
            average_score: 0.0,
            distinctions: 0,
            credits: 0,
            passes: 0,
            fails: 0,
        };

        let mut sum: i64 = 0;
        for record in records {
            sum += i64::from(record.total());
            match Grade::from_total(record.total()) {
                Grade::Distinction => summary.distinctions += 1,
                Grade::Credit => summary.credits += 1,
                Grade::Pass => summary.passes += 1,
                Grade::Fail => summary.fails += 1,
            }
        }

        if !records.is_empty() {
            let average = sum as f64 / records.len() as f64;
            summary.average_score = (average * 100.0).round() / 100.0;
        }

        summary
    }
}
