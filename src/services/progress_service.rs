//! Progress service - Read-only reports over marks and registrations.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::config::{MSG_STUDENT_ID_REQUIRED, RECENT_ACTIVITY_DAYS, RECENT_ACTIVITY_LIMIT};
use crate::domain::{
    ActivityEntry, CourseProgress, EnrolledModule, MarkEntry, MarksFilter, PerformanceSummary,
    RegisteredModule,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Progress reporting service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProgressService: Send + Sync {
    /// Recorded marks, newest first
    async fn list_marks(
        &self,
        filter: MarksFilter,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<MarkEntry>>;

    /// Modules a student is registered for, with marks where entered
    async fn enrolled_modules(
        &self,
        student_id: String,
        course_id: Option<i32>,
    ) -> AppResult<Vec<EnrolledModule>>;

    /// Modules of a course still awaiting marks for the student
    async fn registered_modules(
        &self,
        student_id: String,
        course_id: i32,
        level_id: Option<i32>,
    ) -> AppResult<Vec<RegisteredModule>>;

    /// Per-course completion of the student's active enrollments
    async fn course_progress(&self, student_id: String) -> AppResult<Vec<CourseProgress>>;

    /// College-wide grade distribution
    async fn performance_summary(&self) -> AppResult<PerformanceSummary>;

    /// Latest activity feed entries
    async fn recent_activity(&self) -> AppResult<Vec<ActivityEntry>>;
}

/// Concrete implementation of ProgressService using Unit of Work.
pub struct ProgressReporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProgressReporter<U> {
    /// Create new progress service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn required_student(student_id: &str) -> AppResult<&str> {
    let student_id = student_id.trim();
    if student_id.is_empty() {
        return Err(AppError::validation(MSG_STUDENT_ID_REQUIRED));
    }
    Ok(student_id)
}

#[async_trait]
impl<U: UnitOfWork> ProgressService for ProgressReporter<U> {
    async fn list_marks(
        &self,
        filter: MarksFilter,
        pagination: PaginationParams,
    ) -> AppResult<Paginated<MarkEntry>> {
        let page = pagination.page.max(1);
        let per_page = pagination.limit().max(1);

        let (entries, total) = self
            .uow
            .progress()
            .list_marks(filter, page, per_page)
            .await?;

        Ok(Paginated::new(entries, page, per_page, total))
    }

    async fn enrolled_modules(
        &self,
        student_id: String,
        course_id: Option<i32>,
    ) -> AppResult<Vec<EnrolledModule>> {
        let student_id = required_student(&student_id)?;
        self.uow
            .progress()
            .enrolled_modules(student_id, course_id)
            .await
    }

    async fn registered_modules(
        &self,
        student_id: String,
        course_id: i32,
        level_id: Option<i32>,
    ) -> AppResult<Vec<RegisteredModule>> {
        let student_id = required_student(&student_id)?;
        self.uow
            .progress()
            .registered_modules(student_id, course_id, level_id)
            .await
    }

    async fn course_progress(&self, student_id: String) -> AppResult<Vec<CourseProgress>> {
        let student_id = required_student(&student_id)?;
        self.uow.progress().course_progress(student_id).await
    }

    async fn performance_summary(&self) -> AppResult<PerformanceSummary> {
        let records = self.uow.progress().performance_records().await?;
        Ok(PerformanceSummary::from_records(&records))
    }

    async fn recent_activity(&self) -> AppResult<Vec<ActivityEntry>> {
        let since = Utc::now() - Duration::days(RECENT_ACTIVITY_DAYS);
        self.uow
            .progress()
            .recent_activity(since, RECENT_ACTIVITY_LIMIT)
            .await
    }
}
