//! Create `item` table with FK to `store`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(uuid(Item::Id).primary_key())
                    .col(string_len(Item::Name, 80).not_null())
                    .col(string_len_null(Item::Description, 255))
                    .col(double(Item::Price).not_null())
                    .col(uuid(Item::StoreId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_store")
                            .from(Item::Table, Item::StoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Item::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Item { Table, Id, Name, Description, Price, StoreId }

#[derive(DeriveIden)]
enum Store { Table, Id }
