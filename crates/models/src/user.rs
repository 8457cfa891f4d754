use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Column widths of the `users` table, in characters.
pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 50;
pub const PHONE_MAX_LEN: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Build a fresh row with a generated id and creation timestamps.
pub fn new_active(first_name: &str, last_name: &str, email: &str, phone: &str) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
        phone: Set(phone.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Insert a user row. Field rules are enforced by the service layer.
pub async fn create(db: &DatabaseConnection, first_name: &str, last_name: &str, email: &str, phone: &str) -> Result<Model, DbErr> {
    let am = new_active(first_name, last_name, email, phone);
    am.insert(db).await
}

pub async fn hard_delete(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let res = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}
