use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: i32,
    pub title: String,
    pub category: String,
    /// 0 until rated; updates are gated to [1,5].
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i32,
    pub podcast_id: i32,
    pub title: String,
    pub category: String,
}

/// Podcast together with its eagerly loaded episode collection. Episode
/// lookups scan this collection rather than querying episodes by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodcastDetail {
    pub podcast: Podcast,
    pub episodes: Vec<Episode>,
}

/// Partial podcast update; present fields override the loaded entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodcastChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeChanges {
    pub title: Option<String>,
    pub category: Option<String>,
}
