//! Create `item_tag` join table between `item` and `tag`.
//!
//! One row per association; the (item_id, tag_id) uniqueness lives in the index migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemTag::Table)
                    .if_not_exists()
                    .col(uuid(ItemTag::Id).primary_key())
                    .col(uuid(ItemTag::ItemId).not_null())
                    .col(uuid(ItemTag::TagId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_tag_item")
                            .from(ItemTag::Table, ItemTag::ItemId)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_tag_tag")
                            .from(ItemTag::Table, ItemTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ItemTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ItemTag { Table, Id, ItemId, TagId }

#[derive(DeriveIden)]
enum Item { Table, Id }

#[derive(DeriveIden)]
enum Tag { Table, Id }
