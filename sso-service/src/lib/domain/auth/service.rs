use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::InternalError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppProvider;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserProvider;
use crate::domain::auth::ports::UserSaver;

/// Domain service implementation for authentication.
///
/// Stateless after construction: holds the injected stores, the password
/// hasher and the token issuer (which carries the token TTL). Safe to share
/// across concurrent requests.
pub struct AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    // Verified against when the email is unknown.
    dummy_hash: OnceLock<String>,
}

impl<US, UP, AP> AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - User persistence
    /// * `user_provider` - User lookup
    /// * `app_provider` - App lookup
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(token_ttl),
            dummy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher, e.g. to lower the work factor in tests.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.dummy_hash = OnceLock::new();
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_issuer.ttl()
    }

    fn verify_against_dummy(&self, password: &str) {
        let hash = self
            .dummy_hash
            .get_or_init(|| self.password_hasher.hash("unknown-user").unwrap_or_default());
        let _ = self.password_hasher.verify(password, hash);
    }

    fn issue_token(&self, user: &User, app: &App) -> Result<String, auth::JwtError> {
        self.token_issuer
            .issue(user.id.0, &user.email, app.id.0, app.secret.as_bytes())
    }
}

#[async_trait]
impl<US, UP, AP> AuthServicePort for AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        const OP: &str = "services.auth.Login";

        tracing::info!(op = OP, email = %email, app_id = %app_id, "Logging user in");

        let user = match self.user_provider.user(email).await {
            Ok(user) => user,
            Err(StorageError::NotFound) => {
                tracing::warn!(op = OP, email = %email, "User not found");
                self.verify_against_dummy(password);
                return Err(AuthError::InvalidCredentials { op: OP });
            }
            Err(e) => {
                tracing::error!(op = OP, email = %email, error = %e, "Failed to get user");
                return Err(AuthError::internal(OP, e));
            }
        };

        let password_matches = self
            .password_hasher
            .verify(password, user.password_hash.as_str())
            .map_err(|e| {
                tracing::error!(op = OP, user_id = %user.id, error = %e, "Failed to verify password");
                AuthError::internal(OP, e)
            })?;

        if !password_matches {
            tracing::warn!(op = OP, email = %email, "Invalid credentials");
            return Err(AuthError::InvalidCredentials { op: OP });
        }

        // App lookup failures are internal, never InvalidCredentials.
        let app = self
            .app_provider
            .app(app_id)
            .await
            .map_err(|e| AuthError::internal(OP, e))?;

        let token = self.issue_token(&user, &app).map_err(|e| {
            tracing::error!(op = OP, app_id = %app.id, error = %e, "Failed to generate token");
            AuthError::internal(OP, e)
        })?;

        tracing::info!(op = OP, user_id = %user.id, app_id = %app.id, "User logged in successfully");

        Ok(token)
    }

    async fn register_new_user(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        const OP: &str = "services.auth.RegisterNewUser";

        tracing::info!(op = OP, email = %email, "Registering user");

        let password_hash = self.password_hasher.hash(password).map_err(|e| {
            tracing::error!(op = OP, error = %e, "Failed to generate password hash");
            AuthError::internal(OP, e)
        })?;

        let user_id = match self
            .user_saver
            .save_user(email, &PasswordHash::new(password_hash))
            .await
        {
            Ok(user_id) => user_id,
            Err(StorageError::AlreadyExists) => {
                tracing::warn!(op = OP, email = %email, "User already exists");
                return Err(AuthError::UserExists { op: OP });
            }
            Err(e) => {
                tracing::error!(op = OP, email = %email, error = %e, "Failed to save user");
                return Err(AuthError::internal(OP, e));
            }
        };

        if !user_id.is_valid() {
            tracing::error!(op = OP, user_id = %user_id, "Store returned invalid user id");
            return Err(AuthError::internal(OP, InternalError::InvalidUserId(user_id.0)));
        }

        tracing::info!(op = OP, user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError> {
        const OP: &str = "services.auth.IsAdmin";

        tracing::info!(op = OP, user_id = %user_id, "Checking if user is admin");

        let is_admin = match self.user_provider.is_admin(user_id).await {
            Ok(is_admin) => is_admin,
            // TODO: confirm with product whether this should be UserNotFound
            Err(StorageError::NotFound) => {
                tracing::warn!(op = OP, user_id = %user_id, "User not found");
                return Err(AuthError::InvalidAppId { op: OP });
            }
            Err(e) => {
                tracing::error!(op = OP, user_id = %user_id, error = %e, "Failed to check admin flag");
                return Err(AuthError::internal(OP, e));
            }
        };

        tracing::info!(op = OP, user_id = %user_id, is_admin, "Checked if user is admin");

        Ok(is_admin)
    }
}
