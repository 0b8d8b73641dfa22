//! Service layer for the stores API.
//! - `catalog`: stores, items, tags and the item/tag links, with the
//!   relationship rules enforced inside one transaction per write.
//! - `auth`: user accounts, JWT issuance and the revocation-aware session manager.

pub mod errors;
pub mod catalog;
pub mod auth;
#[cfg(test)]
pub mod test_support;
