//! Shared fixtures for integration tests.
//!
//! Each test gets its own in-memory SQLite database with the real
//! migrations applied and a small college catalog seeded:
//!
//! | course | modules (level)                                |
//! |--------|------------------------------------------------|
//! | 1 Electrical Installation | 11 (1), 12 (1), 13 (2)          |
//! | 2 Plumbing                | 21 (1), 22 (1)                  |

#![allow(dead_code)]

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use vocational_api::config::Config;
use vocational_api::domain::{EnrollStudent, GuardScope, RecordMarks};
use vocational_api::infra::Migrator;
use vocational_api::services::Services;

pub const AMINA: &str = "VTC-1";
pub const BRIAN: &str = "VTC-2";
pub const CAROL: &str = "VTC-3";

pub const ELECTRICAL: i32 = 1;
pub const PLUMBING: i32 = 2;

pub const WIRING: i32 = 11;
pub const MOTOR_CONTROL: i32 = 12;
pub const SOLAR: i32 = 13;
pub const PLUMBING_BASICS: i32 = 21;
pub const PIPE_FITTING: i32 = 22;

const CATALOG: &str = r#"
INSERT INTO students (id, first_name, last_name, status, department_id) VALUES
    ('VTC-1', 'Amina', 'Otieno', 'Active', NULL),
    ('VTC-2', 'Brian', 'Mwangi', 'Active', NULL),
    ('VTC-3', 'Carol', 'Njeri', 'Active', NULL);
INSERT INTO courses (id, name, department_id) VALUES
    (1, 'Electrical Installation', 10),
    (2, 'Plumbing', 20);
INSERT INTO levels (id, name, level_order) VALUES
    (1, 'Level 1', 1),
    (2, 'Level 2', 2);
INSERT INTO modules (id, course_id, level_id, title, code) VALUES
    (11, 1, 1, 'Electrical Wiring', 'ELE101'),
    (12, 1, 1, 'Motor Control', 'ELE102'),
    (13, 1, 2, 'Solar Systems', 'ELE201'),
    (21, 2, 1, 'Plumbing Basics', 'PLB101'),
    (22, 2, 1, 'Pipe Fitting', 'PLB102');
"#;

/// Fresh database with migrations applied and the catalog seeded.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    db.execute_unprepared(CATALOG).await.expect("seed catalog");
    db
}

/// Services wired the way the server wires them.
pub fn services(db: &DatabaseConnection, scope: GuardScope) -> Services {
    let mut config = Config::with_database_url("sqlite::memory:");
    config.enrollment_guard_scope = scope;
    Services::from_connection(db.clone(), &config)
}

pub fn enroll_request(student_id: &str, course_id: i32, modules: &[i32]) -> EnrollStudent {
    EnrollStudent {
        student_id: Some(student_id.to_string()),
        course_id: Some(course_id),
        level_id: Some(1),
        intake_id: Some(2024),
        branch_id: Some(1),
        module_ids: Some(modules.to_vec()),
    }
}

/// Enrollment request for modules taught at `level_id`.
pub fn enroll_at_level(
    student_id: &str,
    course_id: i32,
    level_id: i32,
    modules: &[i32],
) -> EnrollStudent {
    EnrollStudent {
        level_id: Some(level_id),
        ..enroll_request(student_id, course_id, modules)
    }
}

pub fn marks(student_id: &str, module_id: i32, theory: i32, practical: i32) -> RecordMarks {
    RecordMarks {
        student_id: Some(student_id.to_string()),
        module_id: Some(module_id),
        theory_marks: Some(theory),
        practical_marks: Some(practical),
    }
}

pub async fn exec(db: &DatabaseConnection, sql: &str) {
    db.execute_unprepared(sql).await.expect(sql);
}

/// First column of the first row, aliased `value`, as an integer.
pub async fn scalar(db: &DatabaseConnection, sql: &str) -> i64 {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), sql.to_string()))
        .await
        .expect(sql)
        .expect("query returned no rows");
    row.try_get::<i64>("", "value").expect("integer value column")
}

/// First column of the first row, aliased `value`, as optional text.
pub async fn text(db: &DatabaseConnection, sql: &str) -> Option<String> {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), sql.to_string()))
        .await
        .expect(sql)?;
    row.try_get::<Option<String>>("", "value").expect("text value column")
}

pub async fn module_status(db: &DatabaseConnection, student_id: &str, module_id: i32) -> Option<String> {
    text(
        db,
        &format!(
            "SELECT status AS value FROM student_modules WHERE student_id = '{}' AND module_id = {}",
            student_id, module_id
        ),
    )
    .await
}

pub async fn count(db: &DatabaseConnection, table: &str, condition: &str) -> i64 {
    scalar(
        db,
        &format!("SELECT COUNT(*) AS value FROM {} WHERE {}", table, condition),
    )
    .await
}
