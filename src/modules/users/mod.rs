//! User lookup and account deletion.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
