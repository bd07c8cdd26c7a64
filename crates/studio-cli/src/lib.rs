//! # Studio CLI
//!
//! Database seeding utilities for Studio testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use studio_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20); // 20 users, default teachers and sessions
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
