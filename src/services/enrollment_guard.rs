//! Enrollment guard: reconcile module statuses, then decide whether a
//! student may be enrolled in a course.
//!
//! Both phases run on the caller's transaction. The reconcile phase is a
//! real write and callers rely on it even when the decision is `Blocked`.

use crate::domain::{EnrollmentDecision, GuardScope};
use crate::errors::AppResult;
use crate::infra::TransactionContext;

/// Promote registrations that already carry a graded performance row to
/// `Completed`. Returns how many rows changed.
pub async fn reconcile(
    ctx: &TransactionContext<'_>,
    scope: GuardScope,
    student_id: &str,
    course_id: i32,
) -> AppResult<u64> {
    let synced = ctx
        .enrollments()
        .sync_completed_modules(student_id, scope.course_filter(course_id))
        .await?;

    if synced > 0 {
        tracing::debug!(student_id, course_id, synced, "Module statuses reconciled from marks");
    }
    Ok(synced)
}

/// Decide on an enrollment once statuses are reconciled.
///
/// Any registration in scope that is not `Completed` blocks. Otherwise an
/// existing non-completed enrollment in the course is reused in place.
pub async fn decide(
    ctx: &TransactionContext<'_>,
    scope: GuardScope,
    student_id: &str,
    course_id: i32,
) -> AppResult<EnrollmentDecision> {
    let enrollments = ctx.enrollments();

    let outstanding = enrollments
        .count_outstanding_modules(student_id, scope.course_filter(course_id))
        .await?;
    if outstanding > 0 {
        return Ok(EnrollmentDecision::Blocked { outstanding });
    }

    let decision = match enrollments.find_open_enrollment(student_id, course_id).await? {
        Some(id) => EnrollmentDecision::Reuse(id),
        None => EnrollmentDecision::Create,
    };
    Ok(decision)
}

/// Reconcile then decide, in that order.
pub async fn evaluate(
    ctx: &TransactionContext<'_>,
    scope: GuardScope,
    student_id: &str,
    course_id: i32,
) -> AppResult<(u64, EnrollmentDecision)> {
    let synced = reconcile(ctx, scope, student_id, course_id).await?;
    let decision = decide(ctx, scope, student_id, course_id).await?;
    Ok((synced, decision))
}
