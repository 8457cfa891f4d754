use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar-date wire format shared by requests and responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of the `name` column, in characters.
pub const NAME_MAX_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn new_active(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> ActiveModel {
    let now = Utc::now().into();
    ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        start_date: Set(start_date),
        end_date: Set(end_date),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub async fn create(db: &DatabaseConnection, name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Result<Model, DbErr> {
    new_active(name, start_date, end_date).insert(db).await
}

pub async fn hard_delete(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let res = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(res.rows_affected > 0)
}
