//! Credential utilities for the SSO service.
//!
//! - Password hashing (Argon2id, fixed work factor)
//! - JWT encoding and decoding (HS256)
//! - App-scoped token issuance
//!
//! The crate knows nothing about users or apps as domain entities; the service
//! passes identifiers and secrets in and gets strings back.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(Duration::hours(1));
//! let secret = b"app_secret_key_at_least_32_bytes_long!";
//! let token = issuer.issue(1, "alice@example.com", 1, secret).unwrap();
//! let claims = issuer.verify(&token, secret).unwrap();
//! assert_eq!(claims.uid, 1);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
