//! Migration: Create student_performance and activities tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_catalog_tables::{Modules, Students};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentPerformance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentPerformance::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentPerformance::StudentId)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentPerformance::ModuleId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentPerformance::TheoryMarks)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentPerformance::PracticalMarks)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentPerformance::Grade)
                            .string_len(15)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_performance_student_id")
                            .from(StudentPerformance::Table, StudentPerformance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_performance_module_id")
                            .from(StudentPerformance::Table, StudentPerformance::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Upsert target for marks entry
        manager
            .create_index(
                Index::create()
                    .name("idx_student_performance_student_module")
                    .table(StudentPerformance::Table)
                    .col(StudentPerformance::StudentId)
                    .col(StudentPerformance::ModuleId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::StudentId).string_len(50).not_null())
                    .col(ColumnDef::new(Activities::Action).text().not_null())
                    .col(ColumnDef::new(Activities::Course).string().not_null())
                    .col(ColumnDef::new(Activities::Type).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_student_id")
                            .from(Activities::Table, Activities::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activities_created_at")
                    .table(Activities::Table)
                    .col(Activities::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentPerformance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StudentPerformance {
    Table,
    Id,
    StudentId,
    ModuleId,
    TheoryMarks,
    PracticalMarks,
    Grade,
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    StudentId,
    Action,
    Course,
    Type,
    CreatedAt,
}
