//! Lifecycle states for course enrollments and module registrations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status of a student's enrollment in a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EnrollmentStatus {
    Enrolled,
    Ongoing,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "Enrolled",
            EnrollmentStatus::Ongoing => "Ongoing",
            EnrollmentStatus::Completed => "Completed",
            EnrollmentStatus::Dropped => "Dropped",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Enrolled" => Some(EnrollmentStatus::Enrolled),
            "Ongoing" => Some(EnrollmentStatus::Ongoing),
            "Completed" => Some(EnrollmentStatus::Completed),
            "Dropped" => Some(EnrollmentStatus::Dropped),
            _ => None,
        }
    }

    /// Active enrollments count towards progress reporting
    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Enrolled | EnrollmentStatus::Ongoing)
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a student's registration in a single module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ModuleStatus {
    Enrolled,
    Ongoing,
    Completed,
    Failed,
}

impl ModuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Enrolled => "Enrolled",
            ModuleStatus::Ongoing => "Ongoing",
            ModuleStatus::Completed => "Completed",
            ModuleStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Enrolled" => Some(ModuleStatus::Enrolled),
            "Ongoing" => Some(ModuleStatus::Ongoing),
            "Completed" => Some(ModuleStatus::Completed),
            "Failed" => Some(ModuleStatus::Failed),
            _ => None,
        }
    }

    /// Marks were recorded; no further entry without retraction
    pub fn is_finalized(&self) -> bool {
        matches!(self, ModuleStatus::Completed | ModuleStatus::Failed)
    }
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_status_round_trips_through_storage_text() {
        for status in [
            ModuleStatus::Enrolled,
            ModuleStatus::Ongoing,
            ModuleStatus::Completed,
            ModuleStatus::Failed,
        ] {
            assert_eq!(ModuleStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ModuleStatus::parse("completed"), None);
    }

    #[test]
    fn test_only_marked_statuses_are_finalized() {
        assert!(ModuleStatus::Completed.is_finalized());
        assert!(ModuleStatus::Failed.is_finalized());
        assert!(!ModuleStatus::Enrolled.is_finalized());
        assert!(!ModuleStatus::Ongoing.is_finalized());
    }

    #[test]
    fn test_enrollment_active_states() {
        assert!(EnrollmentStatus::Enrolled.is_active());
        assert!(EnrollmentStatus::Ongoing.is_active());
        assert!(!EnrollmentStatus::Completed.is_active());
        assert!(!EnrollmentStatus::Dropped.is_active());
    }
}
