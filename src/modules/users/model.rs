pub use studio_models::users::{User, UserDto};
