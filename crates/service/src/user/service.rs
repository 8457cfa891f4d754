use std::sync::Arc;

use models::user;
use tracing::{info, instrument};

use super::domain::{CreateUser, UserFilters, UserPatch};
use super::repository::UserRepository;
use crate::errors::{require, within, ServiceError};

/// Column widths of the `users` table; absent fields are skipped.
fn check_widths(first: Option<&str>, last: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Result<(), ServiceError> {
    let fields = [
        ("first name", first, user::NAME_MAX_LEN),
        ("last name", last, user::NAME_MAX_LEN),
        ("email", email, user::EMAIL_MAX_LEN),
        ("phone", phone, user::PHONE_MAX_LEN),
    ];
    for (field, value, max) in fields {
        if let Some(v) = value {
            within(field, v, max)?;
        }
    }
    Ok(())
}

/// User business service independent of web framework
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// Create a user after checking both names are present.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, domain::CreateUser, repository::mock::InMemoryUserRepository};
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::default()));
    /// let input = CreateUser { first_name: "Ada".into(), last_name: "Lovelace".into(), ..Default::default() };
    /// let user = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(user.id.len(), 36);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUser) -> Result<user::Model, ServiceError> {
        require("first name", &input.first_name)?;
        require("last name", &input.last_name)?;
        check_widths(Some(&input.first_name), Some(&input.last_name), Some(&input.email), Some(&input.phone))?;
        let created = self.repo.create(&input).await?;
        info!(user_id = %created.id, "user_created");
        Ok(created)
    }

    #[instrument(skip(self, filters))]
    pub async fn get_all(&self, filters: &UserFilters, offset: u64, limit: u64) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.get_all(filters, offset, limit).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<user::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    /// Apply the fields present in `patch`; present names must not be blank.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<user::Model, ServiceError> {
        if let Some(first) = &patch.first_name {
            require("first name", first)?;
        }
        if let Some(last) = &patch.last_name {
            require("last name", last)?;
        }
        check_widths(patch.first_name.as_deref(), patch.last_name.as_deref(), patch.email.as_deref(), patch.phone.as_deref())?;
        let updated = self.repo.update(id, &patch).await?;
        info!(user_id = %updated.id, "user_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("user"));
        }
        info!(user_id = %id, "user_deleted");
        Ok(())
    }

    pub async fn count(&self, filters: &UserFilters) -> Result<u64, ServiceError> {
        self.repo.count(filters).await
    }
}
