use sea_orm::DatabaseConnection;
use migration::MigratorTrait;


/// CRUD operations tests for all models
pub mod crud_tests;

/// Connect and migrate, or `None` when no database is configured for this test run.
pub(crate) async fn setup_test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
