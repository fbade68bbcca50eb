use thiserror::Error;
use tracing::error;

use crate::errors::StoreError;

/// Business errors for catalog workflows. Unlike the account service, every
/// unexpected store failure collapses into the single `Internal` message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Podcast with id {0} not found")]
    PodcastNotFound(i32),
    #[error("Episode with id {episode_id} not found in podcast with id {podcast_id}")]
    EpisodeNotFound { episode_id: i32, podcast_id: i32 },
    #[error("Rating must be between 1 and 5.")]
    InvalidRating,
    #[error("Internal server error occurred.")]
    Internal,
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        // single conversion point for the whole catalog service
        error!(%err, "catalog store failure");
        CatalogError::Internal
    }
}
