pub use studio_models::sessions::{Session, SessionDto, SessionInput};
