//! Middleware and extractors for authentication and authorization.
//!
//! - [`auth`]: the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: role gates for route groups and in-handler checks
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The route group's role gate verifies the token and the caller's role
//! 3. Handlers take `AuthUser` again when they need the caller's identity
//!
//! Neither step touches the database. A token stays usable until it
//! expires, even if its user has since been deleted.

pub mod auth;
pub mod role;
