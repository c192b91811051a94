//! Audit log entries written by the enrollment and marks workflows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{ACTIVITY_TYPE_ENROLLED, ACTIVITY_TYPE_RESULT};

use super::grade::Grade;

/// Activity to append to the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub student_id: String,
    pub action: String,
    pub course: String,
    pub kind: &'static str,
}

impl NewActivity {
    pub fn enrolled(student_id: &str, course_name: &str, modules: usize) -> Self {
        Self {
            student_id: student_id.to_string(),
            action: format!("Enrolled in \"{}\" ({} modules)", course_name, modules),
            course: course_name.to_string(),
            kind: ACTIVITY_TYPE_ENROLLED,
        }
    }

    pub fn marks_entered(student_id: &str, module_title: &str, module_code: &str, grade: Grade) -> Self {
        Self {
            student_id: student_id.to_string(),
            action: format!("Marks entered for \"{}\" (Grade: {})", module_title, grade),
            course: format!("Module: {}", module_code),
            kind: ACTIVITY_TYPE_RESULT,
        }
    }

    pub fn marks_deleted(student_id: &str, module_title: &str, module_code: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            action: format!("Marks deleted for \"{}\"", module_title),
            course: format!("Module: {}", module_code),
            kind: ACTIVITY_TYPE_RESULT,
        }
    }
}

/// Entry of the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ActivityEntry {
    pub id: i32,
    /// Student full name
    pub student: String,
    pub action: String,
    pub course: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_entered_names_module_and_grade() {
        let activity = NewActivity::marks_entered("VTC-1", "Welding I", "WLD101", Grade::Credit);
        assert_eq!(activity.action, "Marks entered for \"Welding I\" (Grade: Credit)");
        assert_eq!(activity.course, "Module: WLD101");
        assert_eq!(activity.kind, ACTIVITY_TYPE_RESULT);
    }

    #[test]
    fn test_enrolled_kind() {
        let activity = NewActivity::enrolled("VTC-1", "Plumbing", 2);
        assert_eq!(activity.kind, ACTIVITY_TYPE_ENROLLED);
        assert!(activity.action.contains("Plumbing"));
    }
}
