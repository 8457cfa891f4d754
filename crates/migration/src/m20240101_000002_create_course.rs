//! Create `courses` table. Start and end are plain calendar dates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(char_len(Courses::Id, 36).primary_key())
                    .col(string_len(Courses::Name, 50).not_null())
                    .col(date(Courses::StartDate).not_null())
                    .col(date(Courses::EndDate).not_null())
                    .col(timestamp_with_time_zone(Courses::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Courses::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Courses::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Courses { Table, Id, Name, StartDate, EndDate, CreatedAt, UpdatedAt }
