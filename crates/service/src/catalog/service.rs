use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Episode, EpisodeChanges, Podcast, PodcastChanges, PodcastDetail};
use super::errors::CatalogError;
use super::repository::{EpisodeStore, PodcastStore};

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Catalog business service covering podcasts and their episodes.
///
/// Existence checks and the mutations behind them are separate store calls
/// with no enclosing transaction; concurrent callers can race between them.
/// Every store failure is reported as the one generic internal error.
pub struct CatalogService<P: PodcastStore, E: EpisodeStore> {
    podcasts: Arc<P>,
    episodes: Arc<E>,
}

impl<P: PodcastStore, E: EpisodeStore> CatalogService<P, E> {
    pub fn new(podcasts: Arc<P>, episodes: Arc<E>) -> Self {
        Self { podcasts, episodes }
    }

    pub async fn podcasts(&self) -> Result<Vec<Podcast>, CatalogError> {
        Ok(self.podcasts.find_all().await?)
    }

    /// Create a podcast and return its assigned id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::catalog::CatalogService;
    /// use service::catalog::repository::mock::MockCatalogStore;
    /// let store = Arc::new(MockCatalogStore::default());
    /// let svc = CatalogService::new(store.clone(), store);
    /// let id = tokio_test::block_on(svc.create_podcast("Crime Junkie", "true crime")).unwrap();
    /// assert_eq!(id, 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn create_podcast(&self, title: &str, category: &str) -> Result<i32, CatalogError> {
        let created = self.podcasts.insert(title, category).await?;
        info!(podcast_id = created.id, "podcast_created");
        Ok(created.id)
    }

    /// Load a podcast together with its episodes.
    pub async fn podcast(&self, id: i32) -> Result<PodcastDetail, CatalogError> {
        self.load_podcast(id).await
    }

    /// Delete a podcast. Existence is verified first; the delete primitive
    /// never runs for a missing id.
    #[instrument(skip(self))]
    pub async fn delete_podcast(&self, id: i32) -> Result<(), CatalogError> {
        if self.podcasts.find_by_id(id).await?.is_none() {
            return Err(CatalogError::PodcastNotFound(id));
        }
        self.podcasts.delete(id).await?;
        info!(podcast_id = id, "podcast_deleted");
        Ok(())
    }

    /// Partial update; a present rating must fall within [1,5] or nothing
    /// is saved. The store receives the whole merged entity.
    #[instrument(skip(self, changes))]
    pub async fn update_podcast(&self, id: i32, changes: PodcastChanges) -> Result<(), CatalogError> {
        let mut merged = self
            .podcasts
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::PodcastNotFound(id))?;
        if let Some(rating) = changes.rating {
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                return Err(CatalogError::InvalidRating);
            }
        }
        if let Some(title) = changes.title {
            merged.title = title;
        }
        if let Some(category) = changes.category {
            merged.category = category;
        }
        if let Some(rating) = changes.rating {
            merged.rating = rating;
        }
        self.podcasts.save(merged).await?;
        Ok(())
    }

    pub async fn episodes(&self, podcast_id: i32) -> Result<Vec<Episode>, CatalogError> {
        Ok(self.load_podcast(podcast_id).await?.episodes)
    }

    pub async fn episode(&self, podcast_id: i32, episode_id: i32) -> Result<Episode, CatalogError> {
        let detail = self.load_podcast(podcast_id).await?;
        scoped_episode(&detail, episode_id)
    }

    /// Create an episode under an existing podcast; returns the episode id.
    #[instrument(skip(self))]
    pub async fn create_episode(&self, podcast_id: i32, title: &str, category: &str) -> Result<i32, CatalogError> {
        if self.podcasts.find_by_id(podcast_id).await?.is_none() {
            return Err(CatalogError::PodcastNotFound(podcast_id));
        }
        let created = self.episodes.insert(podcast_id, title, category).await?;
        info!(podcast_id, episode_id = created.id, "episode_created");
        Ok(created.id)
    }

    /// Merge the supplied fields into the episode and save the whole entity.
    #[instrument(skip(self, changes))]
    pub async fn update_episode(&self, podcast_id: i32, episode_id: i32, changes: EpisodeChanges) -> Result<(), CatalogError> {
        let detail = self.load_podcast(podcast_id).await?;
        let mut merged = scoped_episode(&detail, episode_id)?;
        if let Some(title) = changes.title {
            merged.title = title;
        }
        if let Some(category) = changes.category {
            merged.category = category;
        }
        self.episodes.save(merged).await?;
        Ok(())
    }

    /// Delete an episode after verifying both the podcast and the episode
    /// inside it exist.
    #[instrument(skip(self))]
    pub async fn delete_episode(&self, podcast_id: i32, episode_id: i32) -> Result<(), CatalogError> {
        let detail = self.load_podcast(podcast_id).await?;
        let episode = scoped_episode(&detail, episode_id)?;
        self.episodes.delete(episode.id).await?;
        info!(podcast_id, episode_id, "episode_deleted");
        Ok(())
    }

    async fn load_podcast(&self, id: i32) -> Result<PodcastDetail, CatalogError> {
        self.podcasts
            .find_with_episodes(id)
            .await?
            .ok_or(CatalogError::PodcastNotFound(id))
    }
}

/// Episode lookup stays a linear scan of the loaded podcast's collection.
fn scoped_episode(detail: &PodcastDetail, episode_id: i32) -> Result<Episode, CatalogError> {
    detail
        .episodes
        .iter()
        .find(|e| e.id == episode_id)
        .cloned()
        .ok_or(CatalogError::EpisodeNotFound { episode_id, podcast_id: detail.podcast.id })
}
