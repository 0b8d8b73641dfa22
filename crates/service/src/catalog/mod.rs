//! Catalog module: stores, items, tags and item/tag links.
//!
//! Same three-layer split as `auth`: plain domain views, a repository trait
//! with a SeaORM implementation, and a service that validates input and logs.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CatalogService;
