//! Course enrollment and module registration types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::status::ModuleStatus;
use crate::config::{MSG_MISSING_ENROLLMENT_FIELDS, MSG_NO_MODULES_SELECTED};
use crate::errors::{AppError, AppResult};

/// Request to enroll a student in a course and a set of its modules.
///
/// Fields are optional so that absent values surface as a validation
/// error naming the required fields rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EnrollStudent {
    #[schema(example = "VTC-2024-0001")]
    pub student_id: Option<String>,
    #[schema(example = 3)]
    pub course_id: Option<i32>,
    #[schema(example = 1)]
    pub level_id: Option<i32>,
    #[schema(example = 2024)]
    pub intake_id: Option<i32>,
    #[schema(example = 1)]
    pub branch_id: Option<i32>,
    #[schema(example = json!([11, 12]))]
    pub module_ids: Option<Vec<i32>>,
}

/// Enrollment request with every field present and checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: String,
    pub course_id: i32,
    pub level_id: i32,
    pub intake_id: i32,
    pub branch_id: i32,
    /// Distinct module ids in request order
    pub module_ids: Vec<i32>,
}

impl EnrollStudent {
    /// Check presence of every field and that at least one module is selected.
    pub fn require(self) -> AppResult<NewEnrollment> {
        let missing = || AppError::validation(MSG_MISSING_ENROLLMENT_FIELDS);

        let student_id = present_text(self.student_id).ok_or_else(missing)?;
        let course_id = present_id(self.course_id).ok_or_else(missing)?;
        let level_id = present_id(self.level_id).ok_or_else(missing)?;
        let intake_id = present_id(self.intake_id).ok_or_else(missing)?;
        let branch_id = present_id(self.branch_id).ok_or_else(missing)?;

        let mut module_ids: Vec<i32> = Vec::new();
        for id in self.module_ids.unwrap_or_default() {
            if !module_ids.contains(&id) {
                module_ids.push(id);
            }
        }
        if module_ids.is_empty() {
            return Err(AppError::validation(MSG_NO_MODULES_SELECTED));
        }

        Ok(NewEnrollment {
            student_id,
            course_id,
            level_id,
            intake_id,
            branch_id,
            module_ids,
        })
    }
}

/// Standalone eligibility check request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EligibilityCheck {
    #[validate(length(min = 1, message = "student_id is required"))]
    #[schema(example = "VTC-2024-0001")]
    pub student_id: String,
    #[validate(range(min = 1, message = "course_id is required"))]
    #[schema(example = 3)]
    pub course_id: i32,
}

/// Which module registrations the enrollment guard inspects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardScope {
    /// Any unfinished module of the student blocks a new enrollment
    #[default]
    Student,
    /// Only unfinished modules of the requested course block
    Course,
}

impl GuardScope {
    /// Course filter for the guard's queries under this scope.
    pub fn course_filter(&self, course_id: i32) -> Option<i32> {
        match self {
            GuardScope::Student => None,
            GuardScope::Course => Some(course_id),
        }
    }
}

impl std::str::FromStr for GuardScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(GuardScope::Student),
            "course" => Ok(GuardScope::Course),
            other => Err(format!("unknown guard scope: {}", other)),
        }
    }
}

/// Outcome of the enrollment guard's decide phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentDecision {
    /// No open enrollment for the course; insert a new one
    Create,
    /// Reactivate the existing non-completed enrollment in place
    Reuse(i32),
    /// Modules of the course are still outstanding
    Blocked { outstanding: u64 },
}

impl EnrollmentDecision {
    pub fn existing_enrollment_id(&self) -> Option<i32> {
        match self {
            EnrollmentDecision::Reuse(id) => Some(*id),
            _ => None,
        }
    }
}

/// Result of a successful enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EnrollmentOutcome {
    #[serde(rename = "enrollmentId")]
    pub enrollment_id: i32,
    /// Whether an existing enrollment was reactivated instead of inserted
    pub reused: bool,
    /// Number of module registrations written
    pub modules_registered: usize,
}

/// Eligibility response for the standalone guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Eligibility {
    pub eligible: bool,
    #[serde(rename = "existingEnrollmentId")]
    pub existing_enrollment_id: Option<i32>,
    /// Module statuses promoted to Completed by the sync pass
    pub modules_synced: u64,
}

/// A student's registration in one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRegistration {
    pub id: i32,
    pub student_id: String,
    pub course_id: i32,
    pub module_id: i32,
    pub status: ModuleStatus,
    pub completion_date: Option<NaiveDate>,
}

/// Module registration still awaiting marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegisteredModule {
    pub module_id: i32,
    pub title: String,
    pub level_name: String,
}

pub(crate) fn present_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn present_id(value: Option<i32>) -> Option<i32> {
    value.filter(|id| *id > 0)
}
