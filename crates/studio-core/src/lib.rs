//! # Studio Core
//!
//! Core types, errors, and utilities for the Studio API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`ids`]: Parsing of numeric identifiers taken from request paths
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use studio_core::{AppError, parse_id, hash_password};
//!
//! let id = parse_id("42")?;
//! let hash = hash_password("secure_password")?;
//! let error = AppError::not_found(anyhow::anyhow!("Session not found"));
//! ```

pub mod errors;
pub mod ids;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use ids::{EntityId, parse_id};
pub use password::{hash_password, hash_password_with_cost, verify_password};
