//! Migration: Create enrollments and student_modules tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_catalog_tables::{Courses, Levels, Modules, Students};

static IDX_STUDENT_MODULES_UNIQUE: &str = "idx_student_modules_student_module";
static IDX_ENROLLMENTS_STUDENT_COURSE: &str = "idx_enrollments_student_course";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).string_len(50).not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::IntakeId).integer().null())
                    .col(ColumnDef::new(Enrollments::BranchId).integer().null())
                    .col(ColumnDef::new(Enrollments::EnrollmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .string_len(20)
                            .not_null()
                            .default("Enrolled"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ENROLLMENTS_STUDENT_COURSE)
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentModules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentModules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentModules::StudentId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentModules::CourseId).integer().not_null())
                    .col(ColumnDef::new(StudentModules::LevelId).integer().not_null())
                    .col(ColumnDef::new(StudentModules::ModuleId).integer().not_null())
                    .col(
                        ColumnDef::new(StudentModules::EnrollmentDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentModules::CompletionDate).date().null())
                    .col(
                        ColumnDef::new(StudentModules::Status)
                            .string_len(20)
                            .not_null()
                            .default("Enrolled"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_modules_student_id")
                            .from(StudentModules::Table, StudentModules::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_modules_course_id")
                            .from(StudentModules::Table, StudentModules::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_modules_level_id")
                            .from(StudentModules::Table, StudentModules::LevelId)
                            .to(Levels::Table, Levels::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_modules_module_id")
                            .from(StudentModules::Table, StudentModules::ModuleId)
                            .to(Modules::Table, Modules::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One registration per student and module
        manager
            .create_index(
                Index::create()
                    .name(IDX_STUDENT_MODULES_UNIQUE)
                    .table(StudentModules::Table)
                    .col(StudentModules::StudentId)
                    .col(StudentModules::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentModules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    CourseId,
    IntakeId,
    BranchId,
    EnrollmentDate,
    Status,
}

#[derive(DeriveIden)]
enum StudentModules {
    Table,
    Id,
    StudentId,
    CourseId,
    LevelId,
    ModuleId,
    EnrollmentDate,
    CompletionDate,
    Status,
}
