//! # Studio Models
//!
//! Domain models and DTOs for the Studio API.
//!
//! Database entities (`User`, `Teacher`, `Session`) derive [`sqlx::FromRow`]
//! and stay inside the server. Handlers exchange the DTOs defined next to them.
//!
//! # Modules
//!
//! - [`auth`]: Signup, login and token response bodies
//! - [`sessions`]: Yoga sessions and their participants
//! - [`teachers`]: Teachers leading sessions
//! - [`users`]: Registered users
//!
//! # Example
//!
//! ```ignore
//! use studio_models::{Session, SessionDto};
//!
//! let dto = SessionDto::from(session);
//! ```

pub mod auth;
pub mod sessions;
pub mod teachers;
pub mod users;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use auth::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
pub use sessions::{Session, SessionDto, SessionInput};
pub use teachers::{NewTeacher, Teacher, TeacherDto};
pub use users::{NewUser, User, UserDto};
