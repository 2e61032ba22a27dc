//! Configuration for the Rollcall API.
//!
//! The structs live in `rollcall-config`; this module re-exports them next
//! to the pool initializer from `rollcall-db` so the binary has one place
//! to import startup configuration from.
//!
//! # Environment Variables
//!
//! | variable | default |
//! |----------|---------|
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | 10 |
//! | `DATABASE_ACQUIRE_TIMEOUT_SECS` | 5 |
//! | `DATABASE_STATEMENT_TIMEOUT_MS` | 5000 |
//! | `JWT_SECRET` | required |
//! | `JWT_ACCESS_EXPIRY` | 86400 |
//! | `FRONTEND_URL` | `http://localhost:5173` |
//! | `PORT` | 3001 |
//! | `ENVIRONMENT` | development |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:5173` |

pub use rollcall_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use rollcall_config::{cors, database, jwt, server};
pub use rollcall_db::init_db_pool;
