use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;

use models::enrollment::{self, Column, Entity};

use crate::enrollment::domain::{CreateEnrollment, EnrollmentFilters};
use crate::enrollment::repository::EnrollmentRepository;
use crate::errors::ServiceError;

pub struct SeaOrmEnrollmentRepository {
    pub db: DatabaseConnection,
}

fn condition(f: &EnrollmentFilters) -> Condition {
    let mut cond = Condition::all();
    if !f.user_id.is_empty() {
        cond = cond.add(Column::UserId.eq(f.user_id.clone()));
    }
    if !f.course_id.is_empty() {
        cond = cond.add(Column::CourseId.eq(f.course_id.clone()));
    }
    cond
}

fn store_err(e: sea_orm::DbErr) -> ServiceError {
    error!(error = %e, table = "enrollments", "store_failure");
    ServiceError::store(e)
}

#[async_trait::async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn create(&self, input: &CreateEnrollment) -> Result<enrollment::Model, ServiceError> {
        enrollment::create(&self.db, &input.user_id, &input.course_id).await.map_err(store_err)
    }

    async fn get(&self, id: &str) -> Result<Option<enrollment::Model>, ServiceError> {
        Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(store_err)
    }

    async fn get_all(&self, filters: &EnrollmentFilters, offset: u64, limit: u64) -> Result<Vec<enrollment::Model>, ServiceError> {
        Entity::find()
            .filter(condition(filters))
            .order_by_desc(Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    async fn count(&self, filters: &EnrollmentFilters) -> Result<u64, ServiceError> {
        Entity::find().filter(condition(filters)).count(&self.db).await.map_err(store_err)
    }
}
