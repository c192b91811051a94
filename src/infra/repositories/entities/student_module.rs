//! Per-module registration database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{ModuleRegistration, ModuleStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: String,
    pub course_id: i32,
    pub level_id: i32,
    /// Unique together with `student_id`
    pub module_id: i32,
    pub enrollment_date: Date,
    pub completion_date: Option<Date>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::module::Entity",
        from = "Column::ModuleId",
        to = "super::module::Column::Id"
    )]
    Module,
    #[sea_orm(
        belongs_to = "super::level::Entity",
        from = "Column::LevelId",
        to = "super::level::Column::Id"
    )]
    Level,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for ModuleRegistration {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = ModuleStatus::parse(&model.status).ok_or_else(|| {
            AppError::internal(format!(
                "student_modules row {} has unknown status {:?}",
                model.id, model.status
            ))
        })?;

        Ok(ModuleRegistration {
            id: model.id,
            student_id: model.student_id,
            course_id: model.course_id,
            module_id: model.module_id,
            status,
            completion_date: model.completion_date,
        })
    }
}
