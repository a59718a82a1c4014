use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues app-scoped session tokens with a fixed time-to-live.
///
/// Tokens are signed with the secret of the app they are issued for, so the
/// issuer itself holds no key material.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `ttl` - Lifetime of every issued token
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `user_id` - Token subject
    /// * `email` - Subject email
    /// * `app_id` - Tenant the token is scoped to
    /// * `secret` - Signing secret of that tenant
    ///
    /// # Errors
    /// * `InvalidSecret` - Secret is empty
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        app_id: i32,
        secret: &[u8],
    ) -> Result<String, JwtError> {
        self.issue_at(user_id, email, app_id, secret, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        app_id: i32,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, email, app_id, now, self.ttl);
        JwtHandler::new(secret)?.encode(&claims)
    }

    /// Validate a token against the issuing app's secret and return its claims.
    pub fn verify(&self, token: &str, secret: &[u8]) -> Result<Claims, JwtError> {
        JwtHandler::new(secret)?.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(Duration::minutes(15));

        let before = Utc::now().timestamp();
        let token = issuer
            .issue(42, "alice@example.com", 3, SECRET)
            .expect("Failed to issue token");
        let after = Utc::now().timestamp();

        let claims = issuer.verify(&token, SECRET).expect("Failed to verify token");
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 3);
        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_issue_at_is_deterministic() {
        let issuer = TokenIssuer::new(Duration::hours(1));
        let now = Utc::now();

        let first = issuer.issue_at(1, "a@b.io", 1, SECRET, now).unwrap();
        let second = issuer.issue_at(1, "a@b.io", 1, SECRET, now).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_with_other_app_secret_fails() {
        let issuer = TokenIssuer::new(Duration::hours(1));

        let token = issuer.issue(1, "a@b.io", 1, SECRET).unwrap();
        let result = issuer.verify(&token, b"another_app_secret_at_least_32_bytes");

        assert!(matches!(result, Err(JwtError::DecodingFailed(_))));
    }

    #[test]
    fn test_issue_with_empty_secret_fails() {
        let issuer = TokenIssuer::new(Duration::hours(1));

        let result = issuer.issue(1, "a@b.io", 1, b"");
        assert!(matches!(result, Err(JwtError::InvalidSecret)));
    }
}
