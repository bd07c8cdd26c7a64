//! Yoga sessions and participation.
//!
//! Every route requires authentication. Sessions are created and edited with
//! a [`SessionDto`](model::SessionDto) body; users join and leave a session
//! through the `participate` sub-resource.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
