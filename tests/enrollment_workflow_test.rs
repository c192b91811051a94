//! Enrollment guard and module registration against a real database.

mod common;

use common::*;
use vocational_api::config::{
    MSG_INVALID_COURSE, MSG_INVALID_LEVEL, MSG_INVALID_STUDENT, MSG_MISSING_ENROLLMENT_FIELDS,
    MSG_MODULES_OUTSIDE_COURSE, MSG_MODULES_OUTSIDE_LEVEL, MSG_MODULE_ALREADY_REGISTERED,
    MSG_NO_MODULES_SELECTED,
};
use vocational_api::domain::{EligibilityCheck, GuardScope};
use vocational_api::errors::AppError;
use vocational_api::services::ServiceContainer;

fn check(student_id: &str, course_id: i32) -> EligibilityCheck {
    EligibilityCheck {
        student_id: student_id.to_string(),
        course_id,
    }
}

#[tokio::test]
async fn test_enroll_creates_enrollment_and_registrations() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let outcome = services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING, MOTOR_CONTROL]))
        .await
        .unwrap();

    assert!(!outcome.reused);
    assert_eq!(outcome.modules_registered, 2);
    assert_eq!(
        count(&db, "enrollments", &format!("id = {} AND status = 'Enrolled'", outcome.enrollment_id)).await,
        1
    );
    assert_eq!(module_status(&db, AMINA, WIRING).await.as_deref(), Some("Enrolled"));
    assert_eq!(module_status(&db, AMINA, MOTOR_CONTROL).await.as_deref(), Some("Enrolled"));

    // Course department is copied onto the student
    assert_eq!(
        scalar(&db, "SELECT department_id AS value FROM students WHERE id = 'VTC-1'").await,
        10
    );
    assert_eq!(
        count(&db, "activities", "student_id = 'VTC-1' AND type = 'enrolled'").await,
        1
    );
}

#[tokio::test]
async fn test_duplicate_module_ids_register_once() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let outcome = services
        .enrollments()
        .enroll(enroll_request(BRIAN, ELECTRICAL, &[WIRING, WIRING]))
        .await
        .unwrap();

    assert_eq!(outcome.modules_registered, 1);
    assert_eq!(count(&db, "student_modules", "student_id = 'VTC-2'").await, 1);
}

#[tokio::test]
async fn test_empty_module_list_writes_nothing() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let err = services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_NO_MODULES_SELECTED));
    assert_eq!(count(&db, "enrollments", "1 = 1").await, 0);
    assert_eq!(count(&db, "student_modules", "1 = 1").await, 0);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let mut request = enroll_request(AMINA, ELECTRICAL, &[WIRING]);
    request.intake_id = None;

    let err = services.enrollments().enroll(request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MISSING_ENROLLMENT_FIELDS));
}

#[tokio::test]
async fn test_unknown_references_are_rejected() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let err = services
        .enrollments()
        .enroll(enroll_request("VTC-404", ELECTRICAL, &[WIRING]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_INVALID_STUDENT));

    let err = services
        .enrollments()
        .enroll(enroll_request(AMINA, 99, &[WIRING]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_INVALID_COURSE));

    let err = services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING, PLUMBING_BASICS]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MODULES_OUTSIDE_COURSE));

    assert_eq!(count(&db, "student_modules", "1 = 1").await, 0);
}

#[tokio::test]
async fn test_level_must_exist_and_own_every_module() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let err = services
        .enrollments()
        .enroll(enroll_at_level(AMINA, ELECTRICAL, 999, &[WIRING]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_INVALID_LEVEL));

    let err = services
        .enrollments()
        .enroll(enroll_at_level(AMINA, ELECTRICAL, 1, &[WIRING, SOLAR]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MODULES_OUTSIDE_LEVEL));

    assert_eq!(count(&db, "enrollments", "1 = 1").await, 0);
    assert_eq!(count(&db, "student_modules", "1 = 1").await, 0);

    services
        .enrollments()
        .enroll(enroll_at_level(AMINA, ELECTRICAL, 2, &[SOLAR]))
        .await
        .unwrap();
    assert_eq!(
        scalar(
            &db,
            "SELECT level_id AS value FROM student_modules WHERE student_id = 'VTC-1' AND module_id = 13",
        )
        .await,
        2
    );
}

#[tokio::test]
async fn test_unfinished_modules_block_another_course() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let enrollments = services.enrollments();

    enrollments
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();

    let err = enrollments
        .enroll(enroll_request(AMINA, PLUMBING, &[PLUMBING_BASICS]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EnrollmentBlocked));
    assert_eq!(count(&db, "enrollments", "course_id = 2").await, 0);
    assert_eq!(count(&db, "student_modules", "module_id = 21").await, 0);
    assert_eq!(count(&db, "activities", "student_id = 'VTC-1'").await, 1);

    let err = enrollments.check_eligibility(check(AMINA, PLUMBING)).await.unwrap_err();
    assert!(matches!(err, AppError::EnrollmentBlocked));
}

#[tokio::test]
async fn test_course_scope_only_considers_the_requested_course() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Course);
    let enrollments = services.enrollments();

    enrollments
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();

    let outcome = enrollments
        .enroll(enroll_request(AMINA, PLUMBING, &[PLUMBING_BASICS]))
        .await
        .unwrap();
    assert!(!outcome.reused);

    // Same course is still guarded
    let err = enrollments
        .enroll(enroll_request(AMINA, ELECTRICAL, &[MOTOR_CONTROL]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EnrollmentBlocked));
}

#[tokio::test]
async fn test_check_commits_sync_pass_and_signals_reuse() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let enrollments = services.enrollments();

    let first = enrollments
        .enroll(enroll_request(CAROL, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();

    // Marks entered out of band, status never updated
    exec(
        &db,
        "INSERT INTO student_performance (student_id, module_id, theory_marks, practical_marks, grade) \
         VALUES ('VTC-3', 11, 40, 30, 'Credit')",
    )
    .await;

    let eligibility = enrollments
        .check_eligibility(check(CAROL, ELECTRICAL))
        .await
        .unwrap();

    assert!(eligibility.eligible);
    assert_eq!(eligibility.modules_synced, 1);
    assert_eq!(eligibility.existing_enrollment_id, Some(first.enrollment_id));
    assert_eq!(module_status(&db, CAROL, WIRING).await.as_deref(), Some("Completed"));

    let second = enrollments
        .enroll(enroll_request(CAROL, ELECTRICAL, &[MOTOR_CONTROL]))
        .await
        .unwrap();
    assert!(second.reused);
    assert_eq!(second.enrollment_id, first.enrollment_id);
    assert_eq!(count(&db, "enrollments", "student_id = 'VTC-3'").await, 1);
}

#[tokio::test]
async fn test_sync_pass_persists_when_still_blocked() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let enrollments = services.enrollments();

    enrollments
        .enroll(enroll_request(CAROL, ELECTRICAL, &[WIRING, MOTOR_CONTROL]))
        .await
        .unwrap();
    exec(
        &db,
        "INSERT INTO student_performance (student_id, module_id, theory_marks, practical_marks, grade) \
         VALUES ('VTC-3', 11, 25, 25, 'Pass')",
    )
    .await;

    let err = enrollments
        .check_eligibility(check(CAROL, PLUMBING))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EnrollmentBlocked));
    assert_eq!(module_status(&db, CAROL, WIRING).await.as_deref(), Some("Completed"));
    assert_eq!(module_status(&db, CAROL, MOTOR_CONTROL).await.as_deref(), Some("Enrolled"));
}

#[tokio::test]
async fn test_already_registered_module_is_a_conflict() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    services
        .enrollments()
        .enroll(enroll_request(BRIAN, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();
    services
        .marks()
        .record_marks(marks(BRIAN, WIRING, 40, 40))
        .await
        .unwrap();

    exec(
        &db,
        "UPDATE enrollments SET enrollment_date = '2020-01-15' WHERE student_id = 'VTC-2'",
    )
    .await;

    // Guard reuses the enrollment, so the conflict surfaces after reactivation
    let mut request = enroll_request(BRIAN, ELECTRICAL, &[WIRING, MOTOR_CONTROL]);
    request.intake_id = Some(2025);
    request.branch_id = Some(2);
    let err = services.enrollments().enroll(request).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(ref msg) if msg == MSG_MODULE_ALREADY_REGISTERED));
    assert_eq!(count(&db, "student_modules", "student_id = 'VTC-2'").await, 1);
    assert_eq!(
        count(
            &db,
            "enrollments",
            "student_id = 'VTC-2' AND enrollment_date = '2020-01-15' AND intake_id = 2024 AND branch_id = 1",
        )
        .await,
        1
    );
    assert_eq!(count(&db, "activities", "student_id = 'VTC-2' AND type = 'enrolled'").await, 1);
}
