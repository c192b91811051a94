//! Transaction-bound lookups of students, courses and modules.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::entities::{course, level, module, student};
use crate::domain::{Course, Module, Student};
use crate::errors::AppResult;

/// Reference data reads and the student department update.
///
/// Borrows the transaction so every read sees the workflow's own writes.
pub struct TxCatalogRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCatalogRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_student(&self, id: &str) -> AppResult<Option<Student>> {
        let model = student::Entity::find_by_id(id.to_string())
            .one(self.txn)
            .await?;
        Ok(model.map(Student::from))
    }

    pub async fn find_course(&self, id: i32) -> AppResult<Option<Course>> {
        let model = course::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(Course::from))
    }

    pub async fn level_exists(&self, id: i32) -> AppResult<bool> {
        let found = level::Entity::find()
            .filter(level::Column::Id.eq(id))
            .count(self.txn)
            .await?;
        Ok(found > 0)
    }

    pub async fn find_module(&self, id: i32) -> AppResult<Option<Module>> {
        let model = module::Entity::find_by_id(id).one(self.txn).await?;
        Ok(model.map(Module::from))
    }

    /// Modules among `ids`, ordered by id. Unknown ids are skipped.
    pub async fn find_modules(&self, ids: &[i32]) -> AppResult<Vec<Module>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = module::Entity::find()
            .filter(module::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(module::Column::Id)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(Module::from).collect())
    }

    /// Move the student into the department that owns `course`.
    pub async fn assign_department(&self, student_id: &str, course: &Course) -> AppResult<()> {
        student::Entity::update_many()
            .col_expr(student::Column::DepartmentId, Expr::value(course.department_id))
            .filter(student::Column::Id.eq(student_id))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
