//! # Studio Auth
//!
//! Authentication types and JWT utilities for the Studio API.
//!
//! - [`claims`]: The claim set carried by access tokens
//! - [`jwt`]: Token issuing, verification and validation
//!
//! # Example
//!
//! ```ignore
//! use studio_auth::{create_token, validate_token};
//! use studio_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token("yoga@studio.com", &config)?;
//! assert!(validate_token(&token, &config));
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_token, username_from_token, validate_token, verify_token};
