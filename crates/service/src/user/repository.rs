use async_trait::async_trait;
use models::user;

use super::domain::{CreateUser, UserFilters, UserPatch};
use crate::errors::ServiceError;

/// Persistence capabilities for users. Implementations do no business validation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, input: &CreateUser) -> Result<user::Model, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<user::Model>, ServiceError>;
    /// Newest first.
    async fn get_all(&self, filters: &UserFilters, offset: u64, limit: u64) -> Result<Vec<user::Model>, ServiceError>;
    /// Writes only the fields present in `patch`; `NotFound` when no row has `id`.
    async fn update(&self, id: &str, patch: &UserPatch) -> Result<user::Model, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn count(&self, filters: &UserFilters) -> Result<u64, ServiceError>;
}

/// In-memory repository for tests and local experiments
pub mod mock {
    use super::*;
    use chrono::Utc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use crate::query::{text_contains_ci, window};

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        rows: Mutex<Vec<user::Model>>, // insertion order
        unavailable: Option<String>,
    }

    impl InMemoryUserRepository {
        /// A repository whose every call fails with a store error.
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

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    fn matches(u: &user::Model, f: &UserFilters) -> bool {
        text_contains_ci(&u.first_name, &f.first_name) && text_contains_ci(&u.last_name, &f.last_name)
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, input: &CreateUser) -> Result<user::Model, ServiceError> {
            self.check()?;
            let now = Utc::now().into();
            let model = user::Model {
                id: Uuid::new_v4().to_string(),
                first_name: input.first_name.clone(),
                last_name: input.last_name.clone(),
                email: input.email.clone(),
                phone: input.phone.clone(),
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().await.push(model.clone());
            Ok(model)
        }

        async fn get(&self, id: &str) -> Result<Option<user::Model>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().await.iter().find(|u| u.id == id).cloned())
        }

        async fn get_all(&self, filters: &UserFilters, offset: u64, limit: u64) -> Result<Vec<user::Model>, ServiceError> {
            self.check()?;
            let mut rows: Vec<user::Model> = self.rows.lock().await.iter().rev().filter(|u| matches(u, filters)).cloned().collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let (skip, take) = window(offset, limit);
            Ok(rows.into_iter().skip(skip).take(take).collect())
        }

        async fn update(&self, id: &str, patch: &UserPatch) -> Result<user::Model, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let row = rows.iter_mut().find(|u| u.id == id).ok_or_else(|| ServiceError::not_found("user"))?;
            if patch.is_empty() {
                return Ok(row.clone());
            }
            if let Some(v) = &patch.first_name { row.first_name = v.clone(); }
            if let Some(v) = &patch.last_name { row.last_name = v.clone(); }
            if let Some(v) = &patch.email { row.email = v.clone(); }
            if let Some(v) = &patch.phone { row.phone = v.clone(); }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|u| u.id != id);
            Ok(rows.len() < before)
        }

        async fn count(&self, filters: &UserFilters) -> Result<u64, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().await.iter().filter(|u| matches(u, filters)).count() as u64)
        }
    }
}
