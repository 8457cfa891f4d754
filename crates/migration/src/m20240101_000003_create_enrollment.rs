//! Create `enrollments` table.
//!
//! `user_id` and `course_id` carry no foreign keys: references are checked by the
//! service layer at creation time and may dangle after the target is deleted.
use sea_orm_migration::{prelude::*, schema::*};

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
                    .col(char_len(Enrollments::Id, 36).primary_key())
                    .col(char_len(Enrollments::UserId, 36).not_null())
                    .col(char_len(Enrollments::CourseId, 36).not_null())
                    .col(string_len(Enrollments::Status, 2).not_null())
                    .col(timestamp_with_time_zone(Enrollments::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Enrollments::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enrollments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enrollments { Table, Id, UserId, CourseId, Status, CreatedAt, UpdatedAt }
