//! # Studio Config
//!
//! Configuration types for the Studio API, loaded from environment variables
//! with development defaults.
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: Allowed front-end origins
//! - [`rate_limit`]: Throttling of the authentication endpoints
//! - [`server`]: Bind address and startup behaviour
//!
//! # Example
//!
//! ```ignore
//! use studio_config::{JwtConfig, CorsConfig, RateLimitConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::{AuthGovernorConfig, RateLimitConfig};
pub use server::ServerConfig;
