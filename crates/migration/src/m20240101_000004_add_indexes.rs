use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // List endpoints always order by created_at desc
        manager
            .create_index(
                Index::create()
                    .name("idx_users_created_at")
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_created_at")
                    .table(Courses::Table)
                    .col(Courses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Enrollments: lookups by either side of the reference
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_user")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_users_created_at").table(Users::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_courses_created_at").table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_enrollments_user").table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_enrollments_course").table(Enrollments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users { Table, CreatedAt }

#[derive(DeriveIden)]
enum Courses { Table, CreatedAt }

#[derive(DeriveIden)]
enum Enrollments { Table, UserId, CourseId }
