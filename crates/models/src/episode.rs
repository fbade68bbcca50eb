use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, podcast};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "episode")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub podcast_id: i32,
    pub title: String,
    pub category: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Podcast }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Podcast => Entity::belongs_to(podcast::Entity)
                .from(Column::PodcastId)
                .to(podcast::Column::Id)
                .into(),
        }
    }
}

impl Related<podcast::Entity> for Entity {
    fn to() -> RelationDef { Relation::Podcast.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, podcast_id: i32, title: &str, category: &str) -> Result<Model, errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        podcast_id: Set(podcast_id),
        title: Set(title.to_string()),
        category: Set(category.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
