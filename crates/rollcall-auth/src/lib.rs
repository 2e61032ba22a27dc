//! # Rollcall Auth
//!
//! Authentication types and JWT utilities for the Rollcall API.
//!
//! - [`role`]: the three account roles (admin, teacher, student)
//! - [`claims`]: the identity payload carried by an access token
//! - [`jwt`]: token issuing and verification
//!
//! Tokens are self-contained: the API never looks a token up server-side,
//! so a token stays valid until it expires even if its user is deleted.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{UserRole, create_access_token, verify_token};
//! use rollcall_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token("T-100", UserRole::Teacher, "Ada Lovelace", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, UserRole::Teacher);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
pub use role::UserRole;
