use crate::{course, enrollment, user};
use sea_orm::{EntityTrait, QueryFilter, ColumnTrait};
use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

use super::setup_test_db;

#[test]
fn new_rows_get_distinct_ids_and_equal_timestamps() {
    let a = user::new_active("Ada", "Lovelace", "ada@example.com", "555");
    let b = user::new_active("Ada", "Lovelace", "ada@example.com", "555");
    assert_ne!(a.id.as_ref(), b.id.as_ref());
    assert_eq!(a.created_at.as_ref(), a.updated_at.as_ref());
    assert_eq!(a.id.as_ref().len(), 36);
}

#[test]
fn new_enrollment_is_pending() {
    let e = enrollment::new_active("u", "c");
    assert_eq!(*e.status.as_ref(), enrollment::EnrollmentStatus::Pending);
}

#[test]
fn enrollment_status_serializes_by_name() {
    let json = serde_json::to_string(&enrollment::EnrollmentStatus::Pending).unwrap();
    assert_eq!(json, "\"pending\"");
}

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let email = format!("test_{}@example.com", Uuid::new_v4());
    let created = user::create(&db, "Test", "User", &email, "555-0100").await?;
    assert_eq!(created.email, email);

    let found = user::Entity::find_by_id(created.id.clone()).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let by_email = user::Entity::find().filter(user::Column::Email.eq(email.clone())).one(&db).await?;
    assert_eq!(by_email.map(|u| u.id), Some(created.id.clone()));

    assert!(user::hard_delete(&db, &created.id).await?);
    assert!(!user::hard_delete(&db, &created.id).await?);
    Ok(())
}

/// Test course dates survive a round trip through the date column
#[tokio::test]
async fn test_course_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let created = course::create(&db, "Algebra", start, end).await?;

    let found = course::Entity::find_by_id(created.id.clone()).one(&db).await?.unwrap();
    assert_eq!(found.start_date, start);
    assert_eq!(found.end_date, end);

    assert!(course::hard_delete(&db, &created.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_enrollment_status_code_round_trip() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let created = enrollment::create(&db, &Uuid::new_v4().to_string(), &Uuid::new_v4().to_string()).await?;
    let found = enrollment::Entity::find_by_id(created.id.clone()).one(&db).await?.unwrap();
    assert_eq!(found.status, enrollment::EnrollmentStatus::Pending);

    enrollment::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
