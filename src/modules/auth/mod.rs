//! Registration and login. These routes are public and rate limited.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
