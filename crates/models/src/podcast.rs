use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{episode, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "podcast")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub category: String,
    /// 0 means unrated; the catalog service enforces [1,5] on update.
    pub rating: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Episode }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Episode => Entity::has_many(episode::Entity).into(),
        }
    }
}

impl Related<episode::Entity> for Entity {
    fn to() -> RelationDef { Relation::Episode.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, title: &str, category: &str) -> Result<Model, errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        title: Set(title.to_string()),
        category: Set(category.to_string()),
        rating: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
