//! Transaction-bound access to recorded marks.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set};

use super::entities::student_performance;
use crate::domain::{Grade, MarkSheet, PerformanceRecord};
use crate::errors::{AppError, AppResult};

pub struct TxPerformanceRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPerformanceRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find(&self, student_id: &str, module_id: i32) -> AppResult<Option<PerformanceRecord>> {
        let model = student_performance::Entity::find()
            .filter(student_performance::Column::StudentId.eq(student_id))
            .filter(student_performance::Column::ModuleId.eq(module_id))
            .one(self.txn)
            .await?;
        Ok(model.map(PerformanceRecord::from))
    }

    /// Insert marks, or overwrite the student's existing row for the module.
    pub async fn upsert(
        &self,
        student_id: &str,
        module_id: i32,
        sheet: &MarkSheet,
    ) -> AppResult<PerformanceRecord> {
        let row = student_performance::ActiveModel {
            student_id: Set(student_id.to_string()),
            module_id: Set(module_id),
            theory_marks: Set(sheet.theory()),
            practical_marks: Set(sheet.practical()),
            grade: Set(Some(sheet.grade().as_str().to_string())),
            ..Default::default()
        };

        student_performance::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    student_performance::Column::StudentId,
                    student_performance::Column::ModuleId,
                ])
                .update_columns([
                    student_performance::Column::TheoryMarks,
                    student_performance::Column::PracticalMarks,
                    student_performance::Column::Grade,
                ])
                .to_owned(),
            )
            .exec_without_returning(self.txn)
            .await?;

        self.find(student_id, module_id)
            .await?
            .ok_or_else(|| AppError::internal("marks row missing after upsert"))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = student_performance::Entity::delete_by_id(id)
            .exec(self.txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn all(&self) -> AppResult<Vec<PerformanceRecord>> {
        let models = student_performance::Entity::find()
            .order_by_asc(student_performance::Column::Id)
            .all(self.txn)
            .await?;
        Ok(models.into_iter().map(PerformanceRecord::from).collect())
    }

    pub async fn set_grade(&self, id: i32, grade: Grade) -> AppResult<()> {
        student_performance::Entity::update_many()
            .col_expr(student_performance::Column::Grade, Expr::value(grade.as_str()))
            .filter(student_performance::Column::Id.eq(id))
            .exec(self.txn)
            .await?;
        Ok(())
    }
}
