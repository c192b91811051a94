//! Transaction-bound access to enrollments and module registrations.
//!
//! Every method runs on the caller's transaction. The enrollment guard's
//! sync and decide steps rely on seeing each other's writes.

use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::{enrollment, student_module, student_performance};
use crate::config::MSG_MODULE_ALREADY_REGISTERED;
use crate::domain::{EnrollmentStatus, ModuleRegistration, ModuleStatus, NewEnrollment};
use crate::errors::{AppError, AppResult};

pub struct TxEnrollmentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEnrollmentRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Promote every registration that already has a graded performance row
    /// to `Completed`, limited to one course when `course_id` is given.
    /// Returns the number of rows changed.
    pub async fn sync_completed_modules(
        &self,
        student_id: &str,
        course_id: Option<i32>,
    ) -> AppResult<u64> {
        let graded: Vec<i32> = student_performance::Entity::find()
            .select_only()
            .column(student_performance::Column::ModuleId)
            .filter(student_performance::Column::StudentId.eq(student_id))
            .filter(student_performance::Column::Grade.is_not_null())
            .into_tuple::<i32>()
            .all(self.txn)
            .await?;

        if graded.is_empty() {
            return Ok(0);
        }

        let mut update = student_module::Entity::update_many()
            .col_expr(
                student_module::Column::Status,
                Expr::value(ModuleStatus::Completed.as_str()),
            )
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::Status.ne(ModuleStatus::Completed.as_str()))
            .filter(student_module::Column::ModuleId.is_in(graded));

        if let Some(course_id) = course_id {
            update = update.filter(student_module::Column::CourseId.eq(course_id));
        }

        let result = update.exec(self.txn).await?;

        Ok(result.rows_affected)
    }

    /// Registrations whose status is anything but `Completed`, limited to
    /// one course when `course_id` is given.
    pub async fn count_outstanding_modules(
        &self,
        student_id: &str,
        course_id: Option<i32>,
    ) -> AppResult<u64> {
        let mut query = student_module::Entity::find()
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::Status.ne(ModuleStatus::Completed.as_str()));

        if let Some(course_id) = course_id {
            query = query.filter(student_module::Column::CourseId.eq(course_id));
        }

        Ok(query.count(self.txn).await?)
    }

    /// Latest enrollment in the course that is not `Completed`.
    pub async fn find_open_enrollment(
        &self,
        student_id: &str,
        course_id: i32,
    ) -> AppResult<Option<i32>> {
        let model = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::Status.ne(EnrollmentStatus::Completed.as_str()))
            .order_by_desc(enrollment::Column::Id)
            .one(self.txn)
            .await?;
        Ok(model.map(|m| m.id))
    }

    /// Whether the student holds an enrollment of any status in the course.
    pub async fn is_enrolled_in_course(&self, student_id: &str, course_id: i32) -> AppResult<bool> {
        let count = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .count(self.txn)
            .await?;
        Ok(count > 0)
    }

    pub async fn create_enrollment(&self, request: &NewEnrollment, today: NaiveDate) -> AppResult<i32> {
        let model = enrollment::ActiveModel {
            student_id: Set(request.student_id.clone()),
            course_id: Set(request.course_id),
            intake_id: Set(Some(request.intake_id)),
            branch_id: Set(Some(request.branch_id)),
            enrollment_date: Set(today),
            status: Set(EnrollmentStatus::Enrolled.as_str().to_string()),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;

        Ok(model.id)
    }

    /// Reset an existing enrollment to `Enrolled` with fresh intake, branch and date.
    pub async fn reactivate_enrollment(
        &self,
        enrollment_id: i32,
        request: &NewEnrollment,
        today: NaiveDate,
    ) -> AppResult<()> {
        let result = enrollment::Entity::update_many()
            .col_expr(
                enrollment::Column::Status,
                Expr::value(EnrollmentStatus::Enrolled.as_str()),
            )
            .col_expr(enrollment::Column::EnrollmentDate, Expr::value(today))
            .col_expr(enrollment::Column::IntakeId, Expr::value(request.intake_id))
            .col_expr(enrollment::Column::BranchId, Expr::value(request.branch_id))
            .filter(enrollment::Column::Id.eq(enrollment_id))
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn find_registration(
        &self,
        student_id: &str,
        module_id: i32,
    ) -> AppResult<Option<ModuleRegistration>> {
        let model = student_module::Entity::find()
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::ModuleId.eq(module_id))
            .one(self.txn)
            .await?;

        model.map(ModuleRegistration::try_from).transpose()
    }

    /// Insert one `Enrolled` registration per requested module.
    ///
    /// A module the student already holds is reported as a conflict.
    pub async fn register_modules(&self, request: &NewEnrollment, today: NaiveDate) -> AppResult<usize> {
        let existing = student_module::Entity::find()
            .filter(student_module::Column::StudentId.eq(request.student_id.as_str()))
            .filter(student_module::Column::ModuleId.is_in(request.module_ids.iter().copied()))
            .count(self.txn)
            .await?;

        if existing > 0 {
            return Err(AppError::conflict(MSG_MODULE_ALREADY_REGISTERED));
        }

        let rows = request.module_ids.iter().map(|module_id| student_module::ActiveModel {
            student_id: Set(request.student_id.clone()),
            course_id: Set(request.course_id),
            level_id: Set(request.level_id),
            module_id: Set(*module_id),
            enrollment_date: Set(today),
            completion_date: Set(None),
            status: Set(ModuleStatus::Enrolled.as_str().to_string()),
            ..Default::default()
        });

        student_module::Entity::insert_many(rows)
            .exec(self.txn)
            .await
            .map_err(|e| AppError::from_insert(e, MSG_MODULE_ALREADY_REGISTERED))?;

        Ok(request.module_ids.len())
    }

    /// Record the outcome of marks entry on the registration.
    pub async fn finalize_registration(
        &self,
        registration_id: i32,
        status: ModuleStatus,
        today: NaiveDate,
    ) -> AppResult<()> {
        student_module::Entity::update_many()
            .col_expr(student_module::Column::Status, Expr::value(status.as_str()))
            .col_expr(student_module::Column::CompletionDate, Expr::value(Some(today)))
            .filter(student_module::Column::Id.eq(registration_id))
            .exec(self.txn)
            .await?;
        Ok(())
    }

    /// Put the registration back to `Enrolled` and clear its completion date.
    /// Returns whether a registration existed.
    pub async fn reset_registration(&self, student_id: &str, module_id: i32) -> AppResult<bool> {
        let result = student_module::Entity::update_many()
            .col_expr(
                student_module::Column::Status,
                Expr::value(ModuleStatus::Enrolled.as_str()),
            )
            .col_expr(
                student_module::Column::CompletionDate,
                Expr::value(Option::<NaiveDate>::None),
            )
            .filter(student_module::Column::StudentId.eq(student_id))
            .filter(student_module::Column::ModuleId.eq(module_id))
            .exec(self.txn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
