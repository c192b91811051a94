//! Read-only reporting queries over marks, registrations and activity.
//!
//! These run on the pool, outside any workflow transaction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use super::entities::{
    activity, course, enrollment, level, module, student, student_module, student_performance,
};
use crate::domain::{
    ActivityEntry, CourseProgress, EnrolledModule, EnrollmentStatus, MarkEntry, MarksFilter,
    ModuleStatus, PerformanceRecord, RegisteredModule,
};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reporting repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// One page of recorded marks, newest first, with the total count
    async fn list_marks(
        &self,
        filter: MarksFilter,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<MarkEntry>, u64)>;

    /// Every module the student is registered for, with marks where entered
    async fn enrolled_modules(
        &self,
        student_id: &str,
        course_id: Option<i32>,
    ) -> AppResult<Vec<EnrolledModule>>;

    /// Registrations still in `Enrolled` state for a course, optionally one level
    async fn registered_modules(
        &self,
        student_id: &str,
        course_id: i32,
        level_id: Option<i32>,
    ) -> AppResult<Vec<RegisteredModule>>;

    /// Module progress per active course enrollment
    async fn course_progress(&self, student_id: &str) -> AppResult<Vec<CourseProgress>>;

    /// Every stored performance row
    async fn performance_records(&self) -> AppResult<Vec<PerformanceRecord>>;

    /// Latest activity entries created at or after `since`
    async fn recent_activity(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> AppResult<Vec<ActivityEntry>>;
}

/// Concrete implementation of ProgressRepository
pub struct ProgressStore {
    db: DatabaseConnection,
}

impl ProgressStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MarkRow {
    id: i32,
    student_id: String,
    module_id: i32,
    theory_marks: i32,
    practical_marks: i32,
    grade: Option<String>,
    first_name: String,
    last_name: String,
    department_id: Option<i32>,
    module_title: String,
    module_code: String,
    level_name: String,
    course_name: String,
}

#[derive(Debug, FromQueryResult)]
struct EnrolledRow {
    id: i32,
    title: String,
    code: String,
    level_name: String,
    level_order: i32,
    enrollment_status: String,
    course_name: String,
}

#[derive(Debug, FromQueryResult)]
struct RegisteredRow {
    module_id: i32,
    title: String,
    level_name: String,
}

#[derive(Debug, FromQueryResult)]
struct ActiveCourseRow {
    course_id: i32,
    course_name: String,
}

#[derive(Debug, FromQueryResult)]
struct ActivityRow {
    id: i32,
    first_name: String,
    last_name: String,
    action: String,
    course: String,
    kind: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ProgressRepository for ProgressStore {
    async fn list_marks(
        &self,
        filter: MarksFilter,
        page: u64,
        per_page: u64,
    ) -> AppResult<(Vec<MarkEntry>, u64)> {
        let mut query = student_performance::Entity::find()
            .select_only()
            .column_as(student_performance::Column::Id, "id")
            .column_as(student_performance::Column::StudentId, "student_id")
            .column_as(student_performance::Column::ModuleId, "module_id")
            .column_as(student_performance::Column::TheoryMarks, "theory_marks")
            .column_as(student_performance::Column::PracticalMarks, "practical_marks")
            .column_as(student_performance::Column::Grade, "grade")
            .column_as(student::Column::FirstName, "first_name")
            .column_as(student::Column::LastName, "last_name")
            .column_as(student::Column::DepartmentId, "department_id")
            .column_as(module::Column::Title, "module_title")
            .column_as(module::Column::Code, "module_code")
            .column_as(level::Column::Name, "level_name")
            .column_as(course::Column::Name, "course_name")
            .join(JoinType::InnerJoin, student_performance::Relation::Student.def())
            .join(JoinType::InnerJoin, student_performance::Relation::Module.def())
            .join(JoinType::InnerJoin, module::Relation::Level.def())
            .join(JoinType::InnerJoin, module::Relation::Course.def())
            .order_by_desc(student_performance::Column::Id);

        if let Some(student_id) = filter.student_id {
            query = query.filter(student_performance::Column::StudentId.eq(student_id));
        }
        if let Some(module_id) = filter.module_id {
            query = query.filter(student_performance::Column::ModuleId.eq(module_id));
        }

        let paginator = query.into_model::<MarkRow>().paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;

        // Registration status for each listed (student, module) pair
        let students: Vec<String> = rows.iter().map(|r| r.student_id.clone()).collect();
        let modules: Vec<i32> = rows.iter().map(|r| r.module_id).collect();
        let statuses: HashMap<(String, i32), String> = if rows.is_empty() {
            HashMap::new()
        } else {
            student_module::Entity::find()
                .filter(student_module::Column::StudentId.is_in(students))
                .filter(student_module::Column::ModuleId.is_in(modules))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| ((m.student_id, m.module_id), m.status))
                .collect()
        };

        let entries = rows
            .into_iter()
            .map(|row| {
                let enrollment_status = statuses.get(&(row.student_id.clone(), row.module_id)).cloned();
                MarkEntry {
                    id: row.id,
                    total: row.theory_marks + row.practical_marks,
                    student_id: row.student_id,
                    module_id: row.module_id,
                    theory_marks: row.theory_marks,
                    practical_marks: row.practical_marks,
                    grade: row.grade,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    department_id: row.department_id,
                    module_title: row.module_title,
                    module_code: row.module_code,
                    level_name: row.level_name,
                    course_name: row.course_name,
                    enrollment_status,
                }
            })
            .collect();

        Ok((entries, total))
    }

    async fn enrolled_modules(
        &self,
        student_id: &str,
        course_id: Option<i32>,
    ) -> AppResult<Vec<EnrolledModule>> {
        let mut query = student_module::Entity::find()
            .select_only()
            .column_as(module::Column::Id, "id")
            .column_as(module::Column::Title, "title")
            .column_as(module::Column::Code, "code")
            .column_as(level::Column::Name, "level_name")
            .column_as(level::Column::LevelOrder, "level_order")
            .column_as(student_module::Column::Status, "enrollment_status")
            .column_as(course::Column::Name, "course_name")
            .join(JoinType::InnerJoin, student_module::Relation::Module.def())
            .join(JoinType::InnerJoin, module::Relation::Level.def())
            .join(JoinType::InnerJoin, module::Relation::Course.def())
            .filter(student_module::Column::StudentId.eq(student_id))
            .order_by_asc(level::Column::LevelOrder)
            .order_by_asc(module::Column::Title);

        if let Some(course_id) = course_id {
            query = query.filter(student_module::Column::CourseId.eq(course_id));
        }

        let rows = query.into_model::<EnrolledRow>().all(&self.db).await?;

        let marks: HashMap<i32, student_performance::Model> = student_performance::Entity::find()
            .filter(student_performance::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.module_id, m))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let recorded = marks.get(&row.id);
                EnrolledModule {
                    id: row.id,
                    title: row.title,
                    code: row.code,
                    level_name: row.level_name,
                    level_order: row.level_order,
                    enrollment_status: row.enrollment_status,
                    grade: recorded.and_then(|m| m.grade.clone()),
                    theory_marks: recorded.map(|m| m.theory_marks),
                    practical_marks: recorded.map(|m| m.practical_marks),
                    marks_id: recorded.map(|m| m.id),
                    marks_entered: recorded.is_some(),
                    course_name: row.course_name,
                }
            })
            .collect())
    }

    async fn registered_modules(
        &self,
        student_id: &str,
        course_id: i32,
        level_id: Option<i32>,
    ) -> AppResult<Vec<RegisteredModule>> {
        let mut query = student_module::Entity::find()
            .select_only()
            .column_as(student_module::Column::ModuleId, "module_id")
            .column_as(module::Column::Title, "title")
            .column_as(level::Column::Name, "level_name")
            .join(JoinType::InnerJoin, student_module::Relation::Module.def())
            .join(JoinType::InnerJoin, student_module::Relation::Level.def())
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::CourseId.eq(course_id))
            .filter(student_module::Column::Status.eq(ModuleStatus::Enrolled.as_str()))
            .order_by_asc(student_module::Column::LevelId)
            .order_by_asc(student_module::Column::ModuleId);

        if let Some(level_id) = level_id {
            query = query.filter(student_module::Column::LevelId.eq(level_id));
        }

        let rows = query.into_model::<RegisteredRow>().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| RegisteredModule {
                module_id: row.module_id,
                title: row.title,
                level_name: row.level_name,
            })
            .collect())
    }

    async fn course_progress(&self, student_id: &str) -> AppResult<Vec<CourseProgress>> {
        let active: Vec<&str> = [
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::Ongoing,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Dropped,
        ]
        .into_iter()
        .filter(|s| s.is_active())
        .map(|s| s.as_str())
        .collect();

        let courses = enrollment::Entity::find()
            .select_only()
            .column_as(enrollment::Column::CourseId, "course_id")
            .column_as(course::Column::Name, "course_name")
            .join(JoinType::InnerJoin, enrollment::Relation::Course.def())
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::Status.is_in(active))
            .order_by_asc(enrollment::Column::Id)
            .into_model::<ActiveCourseRow>()
            .all(&self.db)
            .await?;

        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let mut statuses: BTreeMap<i32, Vec<ModuleStatus>> = BTreeMap::new();
        let registrations = student_module::Entity::find()
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::CourseId.is_in(courses.iter().map(|c| c.course_id)))
            .all(&self.db)
            .await?;

        for registration in registrations {
            match ModuleStatus::parse(&registration.status) {
                Some(status) => statuses
                    .entry(registration.course_id)
                    .or_default()
                    .push(status),
                None => tracing::warn!(
                    registration_id = registration.id,
                    status = %registration.status,
                    "Skipping module registration with unknown status"
                ),
            }
        }

        let mut seen = Vec::new();
        let mut progress = Vec::new();
        for row in courses {
            if seen.contains(&row.course_id) {
                continue;
            }
            seen.push(row.course_id);
            let course_statuses = statuses.remove(&row.course_id).unwrap_or_default();
            progress.push(CourseProgress::tally(row.course_id, row.course_name, course_statuses));
        }

        Ok(progress)
    }

    async fn performance_records(&self) -> AppResult<Vec<PerformanceRecord>> {
        let models = student_performance::Entity::find()
            .order_by_asc(student_performance::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(PerformanceRecord::from).collect())
    }

    async fn recent_activity(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> AppResult<Vec<ActivityEntry>> {
        let rows = activity::Entity::find()
            .select_only()
            .column_as(activity::Column::Id, "id")
            .column_as(student::Column::FirstName, "first_name")
            .column_as(student::Column::LastName, "last_name")
            .column_as(activity::Column::Action, "action")
            .column_as(activity::Column::Course, "course")
            .column_as(activity::Column::Kind, "kind")
            .column_as(activity::Column::CreatedAt, "created_at")
            .join(JoinType::InnerJoin, activity::Relation::Student.def())
            .filter(activity::Column::CreatedAt.gte(since))
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
            .limit(limit)
            .into_model::<ActivityRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityEntry {
                id: row.id,
                student: format!("{} {}", row.first_name, row.last_name).trim().to_string(),
                action: row.action,
                course: row.course,
                time: row.created_at,
                kind: row.kind,
            })
            .collect())
    }
}
