pub mod seaorm;

pub use seaorm::{SeaOrmEpisodeStore, SeaOrmPodcastStore};
