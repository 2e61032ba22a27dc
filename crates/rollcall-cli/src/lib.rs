//! # Rollcall CLI
//!
//! Administrative tooling for Rollcall: admin account creation and database
//! seeding for development.
//!
//! ## Usage
//!
//! ```ignore
//! use rollcall_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(5, 40).with_attendance_rate(0.7);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
