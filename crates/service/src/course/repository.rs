use async_trait::async_trait;
use models::course;

use super::domain::{CourseChanges, CourseFilters, NewCourse};
use crate::errors::ServiceError;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, input: &NewCourse) -> Result<course::Model, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<course::Model>, ServiceError>;
    async fn get_all(&self, filters: &CourseFilters, offset: u64, limit: u64) -> Result<Vec<course::Model>, ServiceError>;
    async fn update(&self, id: &str, changes: &CourseChanges) -> Result<course::Model, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn count(&self, filters: &CourseFilters) -> Result<u64, ServiceError>;
}

pub mod mock {
    use super::*;
    use chrono::Utc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::query::{text_contains_ci, window};

    #[derive(Default)]
    pub struct InMemoryCourseRepository {
        rows: Mutex<Vec<course::Model>>,
        unavailable: Option<String>,
    }

    impl InMemoryCourseRepository {
        pub fn unavailable(message: &str) -> Self {
            Self { rows: Mutex::default(), unavailable: Some(message.to_string()) }
        }

        fn check(&self) -> Result<(), ServiceError> {
            match &self.unavailable {
                Some(msg) => Err(ServiceError::Store(msg.clone())),
                None => Ok(()),
            }
        }

        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }
    }

    #[async_trait]
    impl CourseRepository for InMemoryCourseRepository {
        async fn create(&self, input: &NewCourse) -> Result<course::Model, ServiceError> {
            self.check()?;
            let now = Utc::now().into();
            let model = course::Model {
                id: Uuid::new_v4().to_string(),
                name: input.name.clone(),
                start_date: input.start_date,
                end_date: input.end_date,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().await.push(model.clone());
            Ok(model)
        }

        async fn get(&self, id: &str) -> Result<Option<course::Model>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().await.iter().find(|c| c.id == id).cloned())
        }

        async fn get_all(&self, filters: &CourseFilters, offset: u64, limit: u64) -> Result<Vec<course::Model>, ServiceError> {
            self.check()?;
            let mut rows: Vec<course::Model> =
                self.rows.lock().await.iter().rev().filter(|c| text_contains_ci(&c.name, &filters.name)).cloned().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let (skip, take) = window(offset, limit);
            Ok(rows.into_iter().skip(skip).take(take).collect())
        }

        async fn update(&self, id: &str, changes: &CourseChanges) -> Result<course::Model, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let row = rows.iter_mut().find(|c| c.id == id).ok_or_else(|| ServiceError::not_found("course"))?;
            if changes.is_empty() {
                return Ok(row.clone());
            }
            if let Some(v) = &changes.name { row.name = v.clone(); }
            if let Some(v) = changes.start_date { row.start_date = v; }
            if let Some(v) = changes.end_date { row.end_date = v; }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|c| c.id != id);
            Ok(rows.len() < before)
        }

        async fn count(&self, filters: &CourseFilters) -> Result<u64, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().await.iter().filter(|c| text_contains_ci(&c.name, &filters.name)).count() as u64)
        }
    }
}
