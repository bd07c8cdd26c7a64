//! Parsing of numeric entity identifiers taken from request paths.
//!
//! Path segments are accepted as raw strings and parsed here so that a
//! malformed identifier (`/api/session/invalid-id`) is answered with a
//! `400 Bad Request` carrying the usual JSON error body.

use crate::errors::AppError;

pub type EntityId = i64;

pub fn parse_id(raw: &str) -> Result<EntityId, AppError> {
    raw.trim()
        .parse::<EntityId>()
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid identifier: {}", raw)))
}
