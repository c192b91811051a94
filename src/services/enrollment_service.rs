//! Enrollment service - Course enrollment and module registration.
//!
//! Guard, enrollment write, module registrations and the activity entry
//! share one transaction. A rejected guard rolls all of it back.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::enrollment_guard;
use crate::config::{
    MSG_INVALID_COURSE, MSG_INVALID_LEVEL, MSG_INVALID_STUDENT, MSG_MODULES_OUTSIDE_COURSE,
    MSG_MODULES_OUTSIDE_LEVEL,
};
use crate::domain::{
    EligibilityCheck, Eligibility, EnrollStudent, EnrollmentDecision, EnrollmentOutcome,
    GuardScope, NewActivity,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Enrollment service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EnrollmentService: Send + Sync {
    /// Run the enrollment guard on its own.
    ///
    /// The reconcile phase is committed even when the student is blocked.
    async fn check_eligibility(&self, check: EligibilityCheck) -> AppResult<Eligibility>;

    /// Enroll a student in a course and register the selected modules
    async fn enroll(&self, request: EnrollStudent) -> AppResult<EnrollmentOutcome>;
}

/// Concrete implementation of EnrollmentService using Unit of Work.
pub struct EnrollmentManager<U: UnitOfWork> {
    uow: Arc<U>,
    scope: GuardScope,
}

impl<U: UnitOfWork> EnrollmentManager<U> {
    /// Create new enrollment service instance with Unit of Work
    pub fn new(uow: Arc<U>, scope: GuardScope) -> Self {
        Self { uow, scope }
    }
}

#[async_trait]
impl<U: UnitOfWork> EnrollmentService for EnrollmentManager<U> {
    async fn check_eligibility(&self, check: EligibilityCheck) -> AppResult<Eligibility> {
        let scope = self.scope;
        let EligibilityCheck {
            student_id,
            course_id,
        } = check;
        let student = student_id.clone();

        // Blocked is returned as a value so the reconcile pass still commits
        let (synced, decision) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    enrollment_guard::evaluate(&ctx, scope, &student_id, course_id).await
                })
            })
            .await?;

        if let EnrollmentDecision::Blocked { outstanding } = decision {
            tracing::warn!(
                student_id = %student,
                course_id,
                outstanding,
                "Enrollment blocked by unfinished modules"
            );
            return Err(AppError::EnrollmentBlocked);
        }

        Ok(Eligibility {
            eligible: true,
            existing_enrollment_id: decision.existing_enrollment_id(),
            modules_synced: synced,
        })
    }

    async fn enroll(&self, request: EnrollStudent) -> AppResult<EnrollmentOutcome> {
        let request = request.require()?;
        let scope = self.scope;
        let today = Utc::now().date_naive();
        let student = request.student_id.clone();
        let course_id = request.course_id;

        let result = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let catalog = ctx.catalog();

                    let student = catalog
                        .find_student(&request.student_id)
                        .await?
                        .ok_or_else(|| AppError::validation(MSG_INVALID_STUDENT))?;
                    let course = catalog
                        .find_course(request.course_id)
                        .await?
                        .ok_or_else(|| AppError::validation(MSG_INVALID_COURSE))?;
                    if !catalog.level_exists(request.level_id).await? {
                        return Err(AppError::validation(MSG_INVALID_LEVEL));
                    }

                    let modules = catalog.find_modules(&request.module_ids).await?;
                    if modules.len() != request.module_ids.len()
                        || modules.iter().any(|m| m.course_id != course.id)
                    {
                        return Err(AppError::validation(MSG_MODULES_OUTSIDE_COURSE));
                    }
                    if modules.iter().any(|m| m.level_id != request.level_id) {
                        return Err(AppError::validation(MSG_MODULES_OUTSIDE_LEVEL));
                    }

                    let (_, decision) =
                        enrollment_guard::evaluate(&ctx, scope, &student.id, course.id).await?;

                    let enrollments = ctx.enrollments();
                    let (enrollment_id, reused) = match decision {
                        EnrollmentDecision::Blocked { outstanding } => {
                            tracing::warn!(
                                student_id = %student.id,
                                course_id = course.id,
                                outstanding,
                                "Enrollment blocked by unfinished modules"
                            );
                            return Err(AppError::EnrollmentBlocked);
                        }
                        EnrollmentDecision::Reuse(id) => {
                            enrollments.reactivate_enrollment(id, &request, today).await?;
                            (id, true)
                        }
                        EnrollmentDecision::Create => {
                            (enrollments.create_enrollment(&request, today).await?, false)
                        }
                    };

                    let modules_registered = enrollments.register_modules(&request, today).await?;
                    catalog.assign_department(&student.id, &course).await?;

                    ctx.activities()
                        .record(NewActivity::enrolled(
                            &student.id,
                            &course.name,
                            modules_registered,
                        ))
                        .await?;

                    Ok(EnrollmentOutcome {
                        enrollment_id,
                        reused,
                        modules_registered,
                    })
                })
            })
            .await;

        if let Ok(outcome) = &result {
            tracing::info!(
                student_id = %student,
                course_id,
                enrollment_id = outcome.enrollment_id,
                reused = outcome.reused,
                modules = outcome.modules_registered,
                "Student enrolled"
            );
        }

        result
    }
}
