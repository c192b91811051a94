//! Module database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Module;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub level_id: i32,
    pub title: String,
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::level::Entity",
        from = "Column::LevelId",
        to = "super::level::Column::Id"
    )]
    Level,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Module {
    fn from(model: Model) -> Self {
        Module {
            id: model.id,
            course_id: model.course_id,
            level_id: model.level_id,
            title: model.title,
            code: model.code,
        }
    }
}
