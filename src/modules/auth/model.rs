pub use studio_models::auth::{JwtResponse, LoginRequest, MessageResponse, SignupRequest};
