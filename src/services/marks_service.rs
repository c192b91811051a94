//! Marks service - Recording, retracting and regrading module marks.
//!
//! Validation runs in a fixed order so data-entry staff get the rule
//! that failed first: presence, range, student, module, registration,
//! then finality. Nothing is written until all six have passed.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::{MSG_INVALID_MODULE, MSG_INVALID_STUDENT};
use crate::domain::{
    Grade, MarksRecorded, MarksRetracted, NewActivity, RecordMarks, RegradeReport,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Marks service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MarksService: Send + Sync {
    /// Validate and store marks, finalizing the module registration
    async fn record_marks(&self, request: RecordMarks) -> AppResult<MarksRecorded>;

    /// Delete recorded marks and put the module back to `Enrolled`
    async fn retract_marks(&self, student_id: String, module_id: i32) -> AppResult<MarksRetracted>;

    /// Recompute every stored grade from its marks
    async fn regrade_all(&self) -> AppResult<RegradeReport>;
}

/// Concrete implementation of MarksService using Unit of Work.
pub struct MarksRecorder<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MarksRecorder<U> {
    /// Create new marks service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MarksService for MarksRecorder<U> {
    async fn record_marks(&self, request: RecordMarks) -> AppResult<MarksRecorded> {
        let (student_id, module_id, sheet) = request.require()?;
        let today = Utc::now().date_naive();

        let result = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let catalog = ctx.catalog();

                    let student = catalog
                        .find_student(&student_id)
                        .await?
                        .ok_or_else(|| AppError::validation(MSG_INVALID_STUDENT))?;
                    let module = catalog
                        .find_module(module_id)
                        .await?
                        .ok_or_else(|| AppError::validation(MSG_INVALID_MODULE))?;
                    catalog
                        .find_course(module.course_id)
                        .await?
                        .ok_or_else(|| AppError::validation(MSG_INVALID_MODULE))?;

                    let enrollments = ctx.enrollments();
                    let Some(registration) =
                        enrollments.find_registration(&student.id, module.id).await?
                    else {
                        let in_course = enrollments
                            .is_enrolled_in_course(&student.id, module.course_id)
                            .await?;
                        return Err(if in_course {
                            AppError::ModuleNotRegistered {
                                student: student.full_name(),
                                module: module.title,
                            }
                        } else {
                            AppError::EnrollmentMissing {
                                student: student.full_name(),
                                module: module.title,
                            }
                        });
                    };

                    if registration.status.is_finalized() {
                        return Err(AppError::AlreadyFinalized {
                            module: module.title,
                            status: registration.status.to_string(),
                        });
                    }

                    let grade = sheet.grade();
                    let new_status = grade.module_status();

                    ctx.performance().upsert(&student.id, module.id, &sheet).await?;
                    enrollments
                        .finalize_registration(registration.id, new_status, today)
                        .await?;
                    ctx.activities()
                        .record(NewActivity::marks_entered(
                            &student.id,
                            &module.title,
                            &module.code,
                            grade,
                        ))
                        .await?;

                    Ok(MarksRecorded {
                        student_id: student.id,
                        module_id: module.id,
                        theory_marks: sheet.theory(),
                        practical_marks: sheet.practical(),
                        total: sheet.total(),
                        grade,
                        module_title: module.title,
                        new_status,
                    })
                })
            })
            .await;

        match &result {
            Ok(recorded) => tracing::info!(
                student_id = %recorded.student_id,
                module_id = recorded.module_id,
                total = recorded.total,
                grade = %recorded.grade,
                status = %recorded.new_status,
                "Marks recorded"
            ),
            Err(e) if e.status().is_client_error() => {
                tracing::warn!(code = e.code(), "Marks entry rejected: {}", e)
            }
            Err(_) => {}
        }

        result
    }

    async fn retract_marks(&self, student_id: String, module_id: i32) -> AppResult<MarksRetracted> {
        let student = student_id.clone();
        let retracted = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let record = ctx
                        .performance()
                        .find(&student_id, module_id)
                        .await?
                        .ok_or_not_found()?;

                    let catalog = ctx.catalog();
                    let student = catalog.find_student(&student_id).await?.ok_or_not_found()?;
                    let module = catalog.find_module(module_id).await?.ok_or_not_found()?;

                    ctx.performance().delete(record.id).await?;
                    let status_reset = ctx
                        .enrollments()
                        .reset_registration(&student_id, module_id)
                        .await?;

                    ctx.activities()
                        .record(NewActivity::marks_deleted(
                            &student.id,
                            &module.title,
                            &module.code,
                        ))
                        .await?;

                    Ok(MarksRetracted {
                        student: student.full_name(),
                        module: module.title,
                        marks_deleted: true,
                        status_reset,
                    })
                })
            })
            .await?;

        tracing::info!(
            student_id = %student,
            module_id,
            status_reset = retracted.status_reset,
            "Marks retracted"
        );
        Ok(retracted)
    }

    async fn regrade_all(&self) -> AppResult<RegradeReport> {
        let report = self
            .uow
            .transaction_serializable(|ctx| {
                Box::pin(async move {
                    let performance = ctx.performance();
                    let records = performance.all().await?;

                    let mut report = RegradeReport {
                        examined: records.len(),
                        updated: 0,
                    };
                    for record in records {
                        let grade = Grade::from_total(record.total());
                        if record.grade != Some(grade) {
                            performance.set_grade(record.id, grade).await?;
                            report.updated += 1;
                        }
                    }
                    Ok(report)
                })
            })
            .await?;

        tracing::info!(
            examined = report.examined,
            updated = report.updated,
            "Stored grades recomputed"
        );
        Ok(report)
    }
}
