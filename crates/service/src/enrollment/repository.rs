use async_trait::async_trait;
use models::enrollment;

use super::domain::{CreateEnrollment, EnrollmentFilters};
use crate::errors::ServiceError;

/// Enrollments are create-only; there is no update or delete.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn create(&self, input: &CreateEnrollment) -> Result<enrollment::Model, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<enrollment::Model>, ServiceError>;
    async fn get_all(&self, filters: &EnrollmentFilters, offset: u64, limit: u64) -> Result<Vec<enrollment::Model>, ServiceError>;
    async fn count(&self, filters: &EnrollmentFilters) -> Result<u64, ServiceError>;
}

pub mod mock {
    use super::*;
    use chrono::Utc;
    use models::enrollment::EnrollmentStatus;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::query::window;

    #[derive(Default)]
    pub struct InMemoryEnrollmentRepository {
        rows: Mutex<Vec<enrollment::Model>>,
    }

    impl InMemoryEnrollmentRepository {
        pub async fn len(&self) -> usize {
            self.rows.lock().await.len()
        }
    }

    fn matches(e: &enrollment::Model, f: &EnrollmentFilters) -> bool {
        (f.user_id.is_empty() || e.user_id == f.user_id) && (f.course_id.is_empty() || e.course_id == f.course_id)
    }

    #[async_trait]
    impl EnrollmentRepository for InMemoryEnrollmentRepository {
        async fn create(&self, input: &CreateEnrollment) -> Result<enrollment::Model, ServiceError> {
            let now = Utc::now().into();
            let model = enrollment::Model {
                id: Uuid::new_v4().to_string(),
                user_id: input.user_id.clone(),
                course_id: input.course_id.clone(),
                status: EnrollmentStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().await.push(model.clone());
            Ok(model)
        }

        async fn get(&self, id: &str) -> Result<Option<enrollment::Model>, ServiceError> {
            Ok(self.rows.lock().await.iter().find(|e| e.id == id).cloned())
        }

        async fn get_all(&self, filters: &EnrollmentFilters, offset: u64, limit: u64) -> Result<Vec<enrollment::Model>, ServiceError> {
            let mut rows: Vec<enrollment::Model> = self.rows.lock().await.iter().rev().filter(|e| matches(e, filters)).cloned().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let (skip, take) = window(offset, limit);
            Ok(rows.into_iter().skip(skip).take(take).collect())
        }

        async fn count(&self, filters: &EnrollmentFilters) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().await.iter().filter(|e| matches(e, filters)).count() as u64)
        }
    }
}
