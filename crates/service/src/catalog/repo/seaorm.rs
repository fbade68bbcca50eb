use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::StoreError;
use crate::catalog::domain::{Episode, Podcast, PodcastDetail};
use crate::catalog::repository::{EpisodeStore, PodcastStore};

pub struct SeaOrmPodcastStore {
    pub db: DatabaseConnection,
}

pub struct SeaOrmEpisodeStore {
    pub db: DatabaseConnection,
}

fn podcast_view(m: &models::podcast::Model) -> Podcast {
    Podcast { id: m.id, title: m.title.clone(), category: m.category.clone(), rating: m.rating }
}

fn episode_view(m: &models::episode::Model) -> Episode {
    Episode { id: m.id, podcast_id: m.podcast_id, title: m.title.clone(), category: m.category.clone() }
}

#[async_trait::async_trait]
impl PodcastStore for SeaOrmPodcastStore {
    async fn find_all(&self) -> Result<Vec<Podcast>, StoreError> {
        let rows = models::podcast::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(rows.iter().map(podcast_view).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Podcast>, StoreError> {
        let found = models::podcast::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(found.as_ref().map(podcast_view))
    }

    async fn find_with_episodes(&self, id: i32) -> Result<Option<PodcastDetail>, StoreError> {
        let mut rows = models::podcast::Entity::find_by_id(id)
            .find_with_related(models::episode::Entity)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(rows.pop().map(|(podcast, episodes)| PodcastDetail {
            podcast: podcast_view(&podcast),
            episodes: episodes.iter().map(episode_view).collect(),
        }))
    }

    async fn insert(&self, title: &str, category: &str) -> Result<Podcast, StoreError> {
        let created = models::podcast::create(&self.db, title, category).await?;
        Ok(podcast_view(&created))
    }

    async fn save(&self, podcast: Podcast) -> Result<Podcast, StoreError> {
        let existing = models::podcast::Entity::find_by_id(podcast.id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::not_found("podcast"))?;
        let mut am: models::podcast::ActiveModel = existing.into();
        am.title = Set(podcast.title);
        am.category = Set(podcast.category);
        am.rating = Set(podcast.rating);
        am.updated_at = Set(Utc::now().into());
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(podcast_view(&updated))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        models::podcast::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl EpisodeStore for SeaOrmEpisodeStore {
    async fn insert(&self, podcast_id: i32, title: &str, category: &str) -> Result<Episode, StoreError> {
        let created = models::episode::create(&self.db, podcast_id, title, category).await?;
        Ok(episode_view(&created))
    }

    async fn save(&self, episode: Episode) -> Result<Episode, StoreError> {
        let existing = models::episode::Entity::find_by_id(episode.id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .ok_or_else(|| StoreError::not_found("episode"))?;
        let mut am: models::episode::ActiveModel = existing.into();
        am.title = Set(episode.title);
        am.category = Set(episode.category);
        am.updated_at = Set(Utc::now().into());
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(episode_view(&updated))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        models::episode::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
