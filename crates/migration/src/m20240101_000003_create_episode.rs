//! Create `episode` table with FK to `podcast`.
//!
//! Deleting a podcast cascades to its episodes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Episode::Table)
                    .if_not_exists()
                    .col(pk_auto(Episode::Id))
                    .col(integer(Episode::PodcastId).not_null())
                    .col(string_len(Episode::Title, 255).not_null())
                    .col(string_len(Episode::Category, 128).not_null())
                    .col(timestamp_with_time_zone(Episode::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Episode::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episode_podcast")
                            .from(Episode::Table, Episode::PodcastId)
                            .to(Podcast::Table, Podcast::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Episode::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Episode { Table, Id, PodcastId, Title, Category, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Podcast { Table, Id }
