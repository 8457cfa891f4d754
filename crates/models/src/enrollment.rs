use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Enrollment lifecycle code. Stored as a short code, serialized by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(2))")]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    #[sea_orm(string_value = "P")]
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, Course }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(crate::user::Entity).from(Column::UserId).to(crate::user::Column::Id).into(),
            Relation::Course => Entity::belongs_to(crate::course::Entity).from(Column::CourseId).to(crate::course::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// New enrollments always start as `Pending`.
pub fn new_active(user_id: &str, course_id: &str) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        course_id: Set(course_id.to_string()),
        status: Set(EnrollmentStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub async fn create(db: &DatabaseConnection, user_id: &str, course_id: &str) -> Result<Model, DbErr> {
    new_active(user_id, course_id).insert(db).await
}
