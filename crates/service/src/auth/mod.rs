//! Auth module: user accounts plus JWT session handling.
//!
//! - `tokens`: HS256 encode/decode of [`domain::Claims`].
//! - `revocation`: blocklist of revoked token ids (in-memory or database).
//! - `session`: issue, validate and authorize tokens against the blocklist.
//! - `service`: register/login/refresh/logout workflows over an [`repository::AuthRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod tokens;
pub mod revocation;
pub mod session;
pub mod service;

pub use service::AuthService;
pub use session::{SessionManager, TokenStatus};
