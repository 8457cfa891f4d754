use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::error;

use models::user::{self, Column, Entity};

use crate::errors::ServiceError;
use crate::query::contains_ci;
use crate::user::domain::{CreateUser, UserFilters, UserPatch};
use crate::user::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn condition(f: &UserFilters) -> Condition {
    Condition::all()
        .add_option(contains_ci(Column::FirstName, &f.first_name))
        .add_option(contains_ci(Column::LastName, &f.last_name))
}

fn store_err(e: DbErr) -> ServiceError {
    error!(error = %e, table = "users", "store_failure");
    ServiceError::store(e)
}

/// The row can vanish between the read and the write of an update.
fn update_err(e: DbErr) -> ServiceError {
    match e {
        DbErr::RecordNotUpdated => ServiceError::not_found("user"),
        other => store_err(other),
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, input: &CreateUser) -> Result<user::Model, ServiceError> {
        user::create(&self.db, &input.first_name, &input.last_name, &input.email, &input.phone).await.map_err(store_err)
    }

    async fn get(&self, id: &str) -> Result<Option<user::Model>, ServiceError> {
        Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(store_err)
    }

    async fn get_all(&self, filters: &UserFilters, offset: u64, limit: u64) -> Result<Vec<user::Model>, ServiceError> {
        Entity::find()
            .filter(condition(filters))
            .order_by_desc(Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<user::Model, ServiceError> {
        let current = self.get(id).await?.ok_or_else(|| ServiceError::not_found("user"))?;
        if patch.is_empty() {
            return Ok(current);
        }
        let mut am = current.into_active_model();
        if let Some(v) = &patch.first_name { am.first_name = Set(v.clone()); }
        if let Some(v) = &patch.last_name { am.last_name = Set(v.clone()); }
        if let Some(v) = &patch.email { am.email = Set(v.clone()); }
        if let Some(v) = &patch.phone { am.phone = Set(v.clone()); }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map_err(update_err)
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        user::hard_delete(&self.db, id).await.map_err(store_err)
    }

    async fn count(&self, filters: &UserFilters) -> Result<u64, ServiceError> {
        Entity::find().filter(condition(filters)).count(&self.db).await.map_err(store_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn tag() -> String {
        uuid::Uuid::new_v4().simple().to_string()[..10].to_string()
    }

    #[test]
    fn vanished_row_during_update_is_not_found() {
        assert!(matches!(update_err(DbErr::RecordNotUpdated), ServiceError::NotFound(ref m) if m == "user not found"));
        assert!(matches!(update_err(DbErr::Custom("deadlock".into())), ServiceError::Store(ref m) if m.contains("deadlock")));
    }

    #[tokio::test]
    async fn seaorm_user_crud_and_filters() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmUserRepository { db };
        let marker = tag();
        let input = CreateUser {
            first_name: format!("Grace{marker}"),
            last_name: format!("Hopper{marker}"),
            email: "grace@example.com".into(),
            phone: "555-0101".into(),
        };
        let created = repo.create(&input).await?;
        assert_eq!(repo.get(&created.id).await?, Some(created.clone()));

        let filters = UserFilters { last_name: format!("HOPPER{}", marker.to_uppercase()), ..Default::default() };
        assert_eq!(repo.count(&filters).await?, 1);
        assert_eq!(repo.get_all(&filters, 0, 10).await?[0].id, created.id);

        let patch = UserPatch { phone: Some("555-0199".into()), ..Default::default() };
        let updated = repo.update(&created.id, &patch).await?;
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.first_name, created.first_name);

        assert!(repo.delete(&created.id).await?);
        assert!(!repo.delete(&created.id).await?);
        assert!(matches!(repo.update(&created.id, &patch).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
