//! Grade bucketing and marks validation.
//!
//! The only place grade thresholds are defined. Marks recording, the
//! performance summary and the `regrade` command all go through
//! [`Grade::from_total`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::ModuleStatus;
use crate::config::{
    CREDIT_THRESHOLD, DISTINCTION_THRESHOLD, MAX_COMPONENT_MARKS, MIN_COMPONENT_MARKS,
    MSG_MARKS_OUT_OF_RANGE, PASS_THRESHOLD,
};
use crate::errors::{AppError, AppResult};

/// Grade awarded for a module total
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    Fail,
    Pass,
    Credit,
    Distinction,
}

impl Grade {
    /// Bucket a total (theory + practical) into a grade.
    pub fn from_total(total: i32) -> Self {
        if total >= DISTINCTION_THRESHOLD {
            Grade::Distinction
        } else if total >= CREDIT_THRESHOLD {
            Grade::Credit
        } else if total >= PASS_THRESHOLD {
            Grade::Pass
        } else {
            Grade::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Distinction => "Distinction",
            Grade::Credit => "Credit",
            Grade::Pass => "Pass",
            Grade::Fail => "Fail",
        }
    }

    /// Parse a stored grade. Older rows were written upper-case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "distinction" => Some(Grade::Distinction),
            "credit" => Some(Grade::Credit),
            "pass" => Some(Grade::Pass),
            "fail" => Some(Grade::Fail),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        !matches!(self, Grade::Fail)
    }

    /// Module status a student ends up in with this grade
    pub fn module_status(&self) -> ModuleStatus {
        if self.is_pass() {
            ModuleStatus::Completed
        } else {
            ModuleStatus::Failed
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theory and practical marks that passed range validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSheet {
    theory: i32,
    practical: i32,
}

impl MarkSheet {
    pub fn new(theory: i32, practical: i32) -> AppResult<Self> {
        let range = MIN_COMPONENT_MARKS..=MAX_COMPONENT_MARKS;
        if !range.contains(&theory) || !range.contains(&practical) {
            return Err(AppError::validation(MSG_MARKS_OUT_OF_RANGE));
        }
        Ok(Self { theory, practical })
    }

    pub fn theory(&self) -> i32 {
        self.theory
    }

    pub fn practical(&self) -> i32 {
        self.practical
    }

    pub fn total(&self) -> i32 {
        self.theory + self.practical
    }

    pub fn grade(&self) -> Grade {
        Grade::from_total(self.total())
    }
}
