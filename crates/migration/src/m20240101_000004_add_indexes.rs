use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Episode: index on podcast_id for the eager episode load
        manager
            .create_index(
                Index::create()
                    .name("idx_episode_podcast")
                    .table(Episode::Table)
                    .col(Episode::PodcastId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_episode_podcast").table(Episode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Episode { Table, PodcastId }
