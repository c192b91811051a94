//! Marks database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Grade, PerformanceRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_performance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: String,
    /// Unique together with `student_id`
    pub module_id: i32,
    pub theory_marks: i32,
    pub practical_marks: i32,
    pub grade: Option<String>,
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
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PerformanceRecord {
    fn from(model: Model) -> Self {
        PerformanceRecord {
            id: model.id,
            student_id: model.student_id,
            module_id: model.module_id,
            theory_marks: model.theory_marks,
            practical_marks: model.practical_marks,
            grade: model.grade.as_deref().and_then(Grade::parse),
        }
    }
}
