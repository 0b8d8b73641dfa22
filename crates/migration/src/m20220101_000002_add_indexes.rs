use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Item: index on store_id
        manager
            .create_index(
                Index::create()
                    .name("idx_item_store")
                    .table(Item::Table)
                    .col(Item::StoreId)
                    .to_owned(),
            )
            .await?;

        // Tag: composite unique (store_id, name)
        manager
            .create_index(
                Index::create()
                    .name("uniq_tag_store_name")
                    .table(Tag::Table)
                    .col(Tag::StoreId)
                    .col(Tag::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ItemTag: one link per (item_id, tag_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_item_tag_item_tag")
                    .table(ItemTag::Table)
                    .col(ItemTag::ItemId)
                    .col(ItemTag::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_item_tag_tag")
                    .table(ItemTag::Table)
                    .col(ItemTag::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_item_store").table(Item::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_tag_store_name").table(Tag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_item_tag_item_tag").table(ItemTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_item_tag_tag").table(ItemTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Item { Table, StoreId }

#[derive(DeriveIden)]
enum Tag { Table, StoreId, Name }

#[derive(DeriveIden)]
enum ItemTag { Table, ItemId, TagId }
