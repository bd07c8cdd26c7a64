//! JWT (JSON Web Token) utilities for authentication.
//!
//! Tokens are HS512-signed, carry the user's email as subject and expire after
//! [`JwtConfig::expiration_secs`]. Expiry is checked without leeway.
//!
//! Two verification entry points exist:
//!
//! - [`verify_token`] returns the claims or an unauthorized [`AppError`], for
//!   code paths that propagate errors.
//! - [`validate_token`] returns a plain `bool` and logs why a token was
//!   rejected, for the request filter which must never fail the request
//!   with anything but a 401.
//!
//! # Example
//!
//! ```ignore
//! use studio_auth::{create_token, verify_token};
//! use studio_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_token("yoga@studio.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, "yoga@studio.com");
//! ```

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::error;

use studio_config::JwtConfig;
use studio_core::AppError;

use crate::claims::Claims;

const ALGORITHM: Algorithm = Algorithm::HS512;

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation
}

/// Issues a signed access token for the given email.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_token(email: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let lifetime = usize::try_from(jwt_config.expiration_secs).unwrap_or(0);
    let exp = now.saturating_add(lifetime);

    let claims = Claims {
        sub: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired, signed
/// with another key or algorithm.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

/// Returns whether the token is acceptable, logging the rejection cause.
pub fn validate_token(token: &str, jwt_config: &JwtConfig) -> bool {
    if token.trim().is_empty() {
        error!("JWT claims string is empty");
        return false;
    }

    let result = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    );

    match result {
        Ok(_) => true,
        Err(e) => {
            match e.kind() {
                ErrorKind::InvalidSignature => error!("Invalid JWT signature: {}", e),
                ErrorKind::ExpiredSignature => error!("JWT token is expired: {}", e),
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    error!("JWT token is unsupported: {}", e)
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    error!("JWT token is missing claim: {}", claim)
                }
                _ => error!("Invalid JWT token: {}", e),
            }
            false
        }
    }
}

/// Extracts the subject (the user's email) from a valid token.
pub fn username_from_token(token: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    verify_token(token, jwt_config).map(|claims| claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expiration_secs: 3600,
        }
    }

    fn sign_with(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_token_success() {
        let config = get_test_jwt_config();
        let token = create_token("testUser", &config).unwrap();
        assert!(token.len() > 10);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_username_from_token() {
        let config = get_test_jwt_config();
        let token = create_token("yoga@studio.com", &config).unwrap();
        assert_eq!(
            username_from_token(&token, &config).unwrap(),
            "yoga@studio.com"
        );
    }

    #[test]
    fn test_expiry_follows_config() {
        let config = get_test_jwt_config();
        let token = create_token("testUser", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_huge_expiration_saturates() {
        let config = JwtConfig {
            expiration_secs: i64::MAX,
            ..get_test_jwt_config()
        };
        let token = create_token("testUser", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert!(claims.exp >= claims.iat);
        assert_eq!(claims.sub, "testUser");
    }

    #[test]
    fn test_negative_expiration_is_treated_as_zero() {
        let config = JwtConfig {
            expiration_secs: -5,
            ..get_test_jwt_config()
        };
        let token = create_token("testUser", &config).unwrap();
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &{
                let mut v = validation();
                v.validate_exp = false;
                v
            },
        )
        .unwrap()
        .claims;
        assert_eq!(claims.exp, claims.iat);
    }

    #[test]
    fn test_validate_token_valid() {
        let config = get_test_jwt_config();
        let token = create_token("testUser", &config).unwrap();
        assert!(validate_token(&token, &config));
    }

    #[test]
    fn test_validate_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "testUser".to_string(),
            iat: now - 20,
            exp: now - 10,
        };
        let token = sign_with(&claims, ALGORITHM, &config.secret);

        assert!(!validate_token(&token, &config));
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_validate_token_malformed() {
        let config = get_test_jwt_config();
        assert!(!validate_token("this.is.a.fake.token", &config));
        assert!(!validate_token("invalid-token", &config));
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "testUser".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = sign_with(&claims, ALGORITHM, "wrongSecretKey");

        assert!(!validate_token(&token, &config));
    }

    #[test]
    fn test_validate_token_other_algorithm() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "testUser".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = sign_with(&claims, Algorithm::HS256, &config.secret);

        assert!(!validate_token(&token, &config));
    }

    #[test]
    fn test_validate_token_empty() {
        let config = get_test_jwt_config();
        assert!(!validate_token("", &config));
        assert!(!validate_token("   ", &config));
    }

    #[test]
    fn test_validate_token_unsigned() {
        let config = get_test_jwt_config();
        // {"alg":"none"}.{"sub":"testUser"}.
        let token = "eyJhbGciOiJub25lIn0.eyJzdWIiOiJ0ZXN0VXNlciJ9.";
        assert!(!validate_token(token, &config));
    }
}
