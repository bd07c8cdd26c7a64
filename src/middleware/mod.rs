//! Middleware and extractors for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. [`auth::require_auth`] validates the token and loads the user it names
//! 3. The resulting [`auth::AuthUser`] is stored in request extensions
//! 4. Handlers take `AuthUser` as an extractor when they need the principal
//!
//! Any failure ends the request with `401` and the entry-point body:
//!
//! ```json
//! { "status": 401, "error": "Unauthorized", "message": "...", "path": "/api/session" }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn me(auth_user: AuthUser) -> String {
//!     auth_user.email
//! }
//! ```

pub mod auth;
