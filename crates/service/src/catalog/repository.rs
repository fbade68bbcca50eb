use async_trait::async_trait;

use crate::errors::StoreError;
use super::domain::{Episode, Podcast, PodcastDetail};

/// Persistence collaborator for podcasts.
#[async_trait]
pub trait PodcastStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Podcast>, StoreError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Podcast>, StoreError>;
    /// Podcast plus its episode collection in one load.
    async fn find_with_episodes(&self, id: i32) -> Result<Option<PodcastDetail>, StoreError>;
    async fn insert(&self, title: &str, category: &str) -> Result<Podcast, StoreError>;
    /// Upsert of the complete entity, not a field diff.
    async fn save(&self, podcast: Podcast) -> Result<Podcast, StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// Persistence collaborator for episodes. Lookups go through the parent
/// podcast's loaded collection, so there is no find here.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    async fn insert(&self, podcast_id: i32, title: &str, category: &str) -> Result<Episode, StoreError>;
    async fn save(&self, episode: Episode) -> Result<Episode, StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// In-memory catalog implementing both store traits over one data set,
/// for tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCatalogStore {
        podcasts: Mutex<Vec<Podcast>>,
        episodes: Mutex<Vec<Episode>>,
        next_id: AtomicUsize,
        pub podcast_saves: AtomicUsize,
        pub podcast_deletes: AtomicUsize,
        pub episode_saves: AtomicUsize,
        pub episode_deletes: AtomicUsize,
        fail: AtomicBool,
    }

    impl MockCatalogStore {
        /// Make every subsequent operation fail like a dead backend.
        pub fn fail_next_ops(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        pub fn seed_podcast(&self, title: &str, category: &str) -> Podcast {
            let podcast = Podcast {
                id: self.next_id(),
                title: title.to_string(),
                category: category.to_string(),
                rating: 0,
            };
            self.podcasts.lock().unwrap().push(podcast.clone());
            podcast
        }

        pub fn seed_episode(&self, podcast_id: i32, title: &str, category: &str) -> Episode {
            let episode = Episode {
                id: self.next_id(),
                podcast_id,
                title: title.to_string(),
                category: category.to_string(),
            };
            self.episodes.lock().unwrap().push(episode.clone());
            episode
        }

        pub fn stored_podcast(&self, id: i32) -> Option<Podcast> {
            self.podcasts.lock().unwrap().iter().find(|p| p.id == id).cloned()
        }

        pub fn stored_episode(&self, id: i32) -> Option<Episode> {
            self.episodes.lock().unwrap().iter().find(|e| e.id == id).cloned()
        }

        fn next_id(&self) -> i32 {
            (self.next_id.fetch_add(1, Ordering::SeqCst) + 1) as i32
        }

        fn guard(&self) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("backend unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PodcastStore for MockCatalogStore {
        async fn find_all(&self) -> Result<Vec<Podcast>, StoreError> {
            self.guard()?;
            Ok(self.podcasts.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Podcast>, StoreError> {
            self.guard()?;
            Ok(self.stored_podcast(id))
        }

        async fn find_with_episodes(&self, id: i32) -> Result<Option<PodcastDetail>, StoreError> {
            self.guard()?;
            let podcast = match self.stored_podcast(id) {
                Some(p) => p,
                None => return Ok(None),
            };
            let episodes = self
                .episodes
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.podcast_id == id)
                .cloned()
                .collect();
            Ok(Some(PodcastDetail { podcast, episodes }))
        }

        async fn insert(&self, title: &str, category: &str) -> Result<Podcast, StoreError> {
            self.guard()?;
            Ok(self.seed_podcast(title, category))
        }

        async fn save(&self, podcast: Podcast) -> Result<Podcast, StoreError> {
            self.podcast_saves.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            let mut podcasts = self.podcasts.lock().unwrap();
            match podcasts.iter_mut().find(|p| p.id == podcast.id) {
                Some(slot) => *slot = podcast.clone(),
                None => podcasts.push(podcast.clone()),
            }
            Ok(podcast)
        }

        async fn delete(&self, id: i32) -> Result<(), StoreError> {
            self.podcast_deletes.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            self.podcasts.lock().unwrap().retain(|p| p.id != id);
            // mirror the schema's ON DELETE CASCADE
            self.episodes.lock().unwrap().retain(|e| e.podcast_id != id);
            Ok(())
        }
    }

    #[async_trait]
    impl EpisodeStore for MockCatalogStore {
        async fn insert(&self, podcast_id: i32, title: &str, category: &str) -> Result<Episode, StoreError> {
            self.guard()?;
            Ok(self.seed_episode(podcast_id, title, category))
        }

        async fn save(&self, episode: Episode) -> Result<Episode, StoreError> {
            self.episode_saves.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            let mut episodes = self.episodes.lock().unwrap();
            match episodes.iter_mut().find(|e| e.id == episode.id) {
                Some(slot) => *slot = episode.clone(),
                None => episodes.push(episode.clone()),
            }
            Ok(episode)
        }

        async fn delete(&self, id: i32) -> Result<(), StoreError> {
            self.episode_deletes.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            self.episodes.lock().unwrap().retain(|e| e.id != id);
            Ok(())
        }
    }
}
