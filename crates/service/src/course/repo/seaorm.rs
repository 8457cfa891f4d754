use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::error;

use models::course::{self, Column, Entity};

use crate::course::domain::{CourseChanges, CourseFilters, NewCourse};
use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;
use crate::query::contains_ci;

pub struct SeaOrmCourseRepository {
    pub db: DatabaseConnection,
}

fn condition(f: &CourseFilters) -> Condition {
    Condition::all().add_option(contains_ci(Column::Name, &f.name))
}

fn store_err(e: DbErr) -> ServiceError {
    error!(error = %e, table = "courses", "store_failure");
    ServiceError::store(e)
}

fn update_err(e: DbErr) -> ServiceError {
    match e {
        DbErr::RecordNotUpdated => ServiceError::not_found("course"),
        other => store_err(other),
    }
}

#[async_trait::async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, input: &NewCourse) -> Result<course::Model, ServiceError> {
        course::create(&self.db, &input.name, input.start_date, input.end_date).await.map_err(store_err)
    }

    async fn get(&self, id: &str) -> Result<Option<course::Model>, ServiceError> {
        Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(store_err)
    }

    async fn get_all(&self, filters: &CourseFilters, offset: u64, limit: u64) -> Result<Vec<course::Model>, ServiceError> {
        Entity::find()
            .filter(condition(filters))
            .order_by_desc(Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    async fn update(&self, id: &str, changes: &CourseChanges) -> Result<course::Model, ServiceError> {
        let current = self.get(id).await?.ok_or_else(|| ServiceError::not_found("course"))?;
        if changes.is_empty() {
            return Ok(current);
        }
        let mut am = current.into_active_model();
        if let Some(v) = &changes.name { am.name = Set(v.clone()); }
        if let Some(v) = changes.start_date { am.start_date = Set(v); }
        if let Some(v) = changes.end_date { am.end_date = Set(v); }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map_err(update_err)
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        course::hard_delete(&self.db, id).await.map_err(store_err)
    }

    async fn count(&self, filters: &CourseFilters) -> Result<u64, ServiceError> {
        Entity::find().filter(condition(filters)).count(&self.db).await.map_err(store_err)
    }
}
