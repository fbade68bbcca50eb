//! Create `podcast` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Podcast::Table)
                    .if_not_exists()
                    .col(pk_auto(Podcast::Id))
                    .col(string_len(Podcast::Title, 255).not_null())
                    .col(string_len(Podcast::Category, 128).not_null())
                    // Unrated podcasts sit at 0; ratings are only validated on update.
                    .col(integer(Podcast::Rating).not_null().default(0))
                    .col(timestamp_with_time_zone(Podcast::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Podcast::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Podcast::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Podcast { Table, Id, Title, Category, Rating, CreatedAt, UpdatedAt }
