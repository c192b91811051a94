//! Marks recording, retraction and regrading against a real database.

mod common;

use common::*;
use vocational_api::config::{
    MSG_INVALID_MODULE, MSG_INVALID_STUDENT, MSG_MARKS_OUT_OF_RANGE, MSG_MISSING_MARKS_FIELDS,
};
use vocational_api::domain::{Grade, GuardScope, ModuleStatus};
use vocational_api::errors::AppError;
use vocational_api::services::ServiceContainer;

#[tokio::test]
async fn test_record_marks_finalizes_registration() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING, MOTOR_CONTROL]))
        .await
        .unwrap();

    let recorded = services
        .marks()
        .record_marks(marks(AMINA, WIRING, 30, 25))
        .await
        .unwrap();

    assert_eq!(recorded.total, 55);
    assert_eq!(recorded.grade, Grade::Pass);
    assert_eq!(recorded.new_status, ModuleStatus::Completed);
    assert_eq!(recorded.module_title, "Electrical Wiring");

    assert_eq!(module_status(&db, AMINA, WIRING).await.as_deref(), Some("Completed"));
    assert_eq!(
        count(&db, "student_modules", "module_id = 11 AND completion_date IS NOT NULL").await,
        1
    );
    assert_eq!(
        text(&db, "SELECT grade AS value FROM student_performance WHERE module_id = 11")
            .await
            .as_deref(),
        Some("Pass")
    );
    assert_eq!(
        text(&db, "SELECT action AS value FROM activities WHERE type = 'result'")
            .await
            .as_deref(),
        Some("Marks entered for \"Electrical Wiring\" (Grade: Pass)")
    );
}

#[tokio::test]
async fn test_ongoing_registration_accepts_marks() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    services
        .enrollments()
        .enroll(enroll_request(BRIAN, ELECTRICAL, &[WIRING, MOTOR_CONTROL]))
        .await
        .unwrap();
    exec(
        &db,
        "UPDATE student_modules SET status = 'Ongoing' WHERE student_id = 'VTC-2'",
    )
    .await;

    let passed = services
        .marks()
        .record_marks(marks(BRIAN, WIRING, 30, 30))
        .await
        .unwrap();
    let failed = services
        .marks()
        .record_marks(marks(BRIAN, MOTOR_CONTROL, 10, 15))
        .await
        .unwrap();

    assert_eq!(passed.new_status, ModuleStatus::Completed);
    assert_eq!(failed.new_status, ModuleStatus::Failed);
    assert_eq!(module_status(&db, BRIAN, WIRING).await.as_deref(), Some("Completed"));
    assert_eq!(module_status(&db, BRIAN, MOTOR_CONTROL).await.as_deref(), Some("Failed"));
}

#[tokio::test]
async fn test_failing_total_marks_module_failed() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    services
        .enrollments()
        .enroll(enroll_request(BRIAN, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();

    let recorded = services
        .marks()
        .record_marks(marks(BRIAN, WIRING, 24, 25))
        .await
        .unwrap();

    assert_eq!(recorded.total, 49);
    assert_eq!(recorded.grade, Grade::Fail);
    assert_eq!(recorded.new_status, ModuleStatus::Failed);
    assert_eq!(module_status(&db, BRIAN, WIRING).await.as_deref(), Some("Failed"));
}

#[tokio::test]
async fn test_validation_order_reports_first_failing_rule() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let recorder = services.marks();

    services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();

    // 1. presence, even when marks are also out of range
    let mut request = marks(AMINA, WIRING, 99, 25);
    request.practical_marks = None;
    let err = recorder.record_marks(request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MISSING_MARKS_FIELDS));

    // 2. range, before the student is looked up
    let err = recorder
        .record_marks(marks("VTC-404", WIRING, 51, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MARKS_OUT_OF_RANGE));

    let err = recorder
        .record_marks(marks(AMINA, WIRING, 10, -1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_MARKS_OUT_OF_RANGE));

    // 3. student
    let err = recorder
        .record_marks(marks("VTC-404", 999, 10, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_INVALID_STUDENT));

    // 4. module
    let err = recorder
        .record_marks(marks(AMINA, 999, 10, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg == MSG_INVALID_MODULE));

    // 5a. enrolled in the course but not in this module
    let err = recorder
        .record_marks(marks(AMINA, MOTOR_CONTROL, 10, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ModuleNotRegistered { .. }));
    assert!(err.is_not_eligible());
    assert!(err.to_string().contains("Motor Control"));

    // 5b. not enrolled in the module's course at all
    let err = recorder
        .record_marks(marks(AMINA, PLUMBING_BASICS, 10, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EnrollmentMissing { .. }));
    assert!(err.to_string().contains("Amina Otieno"));

    assert_eq!(count(&db, "student_performance", "1 = 1").await, 0);
    assert_eq!(module_status(&db, AMINA, WIRING).await.as_deref(), Some("Enrolled"));
}

#[tokio::test]
async fn test_second_entry_is_already_finalized() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let recorder = services.marks();

    services
        .enrollments()
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING]))
        .await
        .unwrap();
    recorder.record_marks(marks(AMINA, WIRING, 30, 25)).await.unwrap();

    let err = recorder
        .record_marks(marks(AMINA, WIRING, 50, 50))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AlreadyFinalized { ref status, .. } if status == "Completed"));
    assert_eq!(
        scalar(&db, "SELECT theory_marks + practical_marks AS value FROM student_performance").await,
        55
    );
}

#[tokio::test]
async fn test_retraction_round_trip() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let recorder = services.marks();

    services
        .enrollments()
        .enroll(enroll_at_level(CAROL, ELECTRICAL, 2, &[SOLAR]))
        .await
        .unwrap();
    let first = recorder.record_marks(marks(CAROL, SOLAR, 40, 26)).await.unwrap();

    let retracted = recorder.retract_marks(CAROL.to_string(), SOLAR).await.unwrap();
    assert_eq!(retracted.student, "Carol Njeri");
    assert_eq!(retracted.module, "Solar Systems");
    assert!(retracted.marks_deleted);
    assert!(retracted.status_reset);

    assert_eq!(module_status(&db, CAROL, SOLAR).await.as_deref(), Some("Enrolled"));
    assert_eq!(
        count(&db, "student_modules", "module_id = 13 AND completion_date IS NULL").await,
        1
    );
    assert_eq!(count(&db, "student_performance", "1 = 1").await, 0);

    let second = recorder.record_marks(marks(CAROL, SOLAR, 40, 26)).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(second.grade, Grade::Credit);
    assert_eq!(
        count(&db, "activities", "student_id = 'VTC-3' AND type = 'result'").await,
        3
    );
}

#[tokio::test]
async fn test_retract_missing_marks_is_not_found() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    let err = services
        .marks()
        .retract_marks(AMINA.to_string(), WIRING)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound));
    assert_eq!(count(&db, "activities", "1 = 1").await, 0);
}

#[tokio::test]
async fn test_progression_across_courses() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);
    let enrollments = services.enrollments();
    let recorder = services.marks();

    enrollments
        .enroll(enroll_request(AMINA, ELECTRICAL, &[WIRING, MOTOR_CONTROL]))
        .await
        .unwrap();
    assert_eq!(module_status(&db, AMINA, WIRING).await.as_deref(), Some("Enrolled"));
    assert_eq!(module_status(&db, AMINA, MOTOR_CONTROL).await.as_deref(), Some("Enrolled"));

    let m1 = recorder.record_marks(marks(AMINA, WIRING, 30, 25)).await.unwrap();
    assert_eq!((m1.total, m1.grade, m1.new_status), (55, Grade::Pass, ModuleStatus::Completed));

    let err = enrollments
        .enroll(enroll_request(AMINA, PLUMBING, &[PLUMBING_BASICS]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EnrollmentBlocked));

    let m2 = recorder
        .record_marks(marks(AMINA, MOTOR_CONTROL, 45, 40))
        .await
        .unwrap();
    assert_eq!(
        (m2.total, m2.grade, m2.new_status),
        (85, Grade::Distinction, ModuleStatus::Completed)
    );

    let outcome = enrollments
        .enroll(enroll_request(AMINA, PLUMBING, &[PLUMBING_BASICS, PIPE_FITTING]))
        .await
        .unwrap();
    assert!(!outcome.reused);
    assert_eq!(outcome.modules_registered, 2);
    assert_eq!(
        scalar(&db, "SELECT department_id AS value FROM students WHERE id = 'VTC-1'").await,
        20
    );
}

#[tokio::test]
async fn test_regrade_rewrites_stale_grades() {
    let db = setup_db().await;
    let services = services(&db, GuardScope::Student);

    exec(
        &db,
        "INSERT INTO student_performance (student_id, module_id, theory_marks, practical_marks, grade) VALUES \
         ('VTC-1', 11, 40, 40, 'Credit'), \
         ('VTC-2', 11, 30, 25, 'Pass'), \
         ('VTC-3', 11, 10, 10, NULL)",
    )
    .await;

    let report = services.marks().regrade_all().await.unwrap();

    assert_eq!(report.examined, 3);
    assert_eq!(report.updated, 2);
    assert_eq!(
        text(&db, "SELECT grade AS value FROM student_performance WHERE student_id = 'VTC-1'")
            .await
            .as_deref(),
        Some("Distinction")
    );
    assert_eq!(
        text(&db, "SELECT grade AS value FROM student_performance WHERE student_id = 'VTC-3'")
            .await
            .as_deref(),
        Some("Fail")
    );
}
