//! Student and module reference data as seen by the workflow.

/// Student identity used in messages and activity entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub status: String,
    pub department_id: Option<i32>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Module with the course it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: i32,
    pub course_id: i32,
    pub level_id: i32,
    pub title: String,
    pub code: String,
}

/// Course catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub department_id: Option<i32>,
}
