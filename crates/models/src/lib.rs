//! SeaORM entities for the catalog (stores, items, tags and their links), user
//! accounts and the durable token blocklist, plus connection bootstrap.
//!
//! Entity modules carry small `create`/`validate_*` helpers generic over
//! `ConnectionTrait`, so callers can run them on a pool or inside a transaction.

pub mod errors;
pub mod db;
mod validate;
pub mod store;
pub mod item;
pub mod tag;
pub mod item_tag;
pub mod user;
pub mod revoked_token;

#[cfg(test)]
mod tests;
