//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000011_create_store;
mod m20220101_000012_create_user;
mod m20220101_000013_create_item;
mod m20220101_000014_create_tag;
mod m20220101_000015_create_item_tag;
mod m20220101_000016_create_revoked_token;
mod m20220101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000011_create_store::Migration),
            Box::new(m20220101_000012_create_user::Migration),
            Box::new(m20220101_000013_create_item::Migration),
            Box::new(m20220101_000014_create_tag::Migration),
            Box::new(m20220101_000015_create_item_tag::Migration),
            Box::new(m20220101_000016_create_revoked_token::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000002_add_indexes::Migration),
        ]
    }
}
