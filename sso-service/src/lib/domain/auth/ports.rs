use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::PasswordHash;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Authenticate a user and issue a token scoped to an app.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `password` - Plaintext password
    /// * `app_id` - App the token is issued for
    ///
    /// # Returns
    /// Signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Store, hashing, app lookup or signing failure
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Internal` - Hashing or store failure
    async fn register_new_user(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Check whether a user has admin privileges.
    ///
    /// # Errors
    /// * `InvalidAppId` - Store has no such user
    /// * `Internal` - Store failure
    async fn is_admin(&self, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Store a user and return the assigned identifier.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn save_user(
        &self,
        email: &str,
        password_hash: &PasswordHash,
    ) -> Result<UserId, StorageError>;
}

/// Read access to users.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Find a user by email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn user(&self, email: &str) -> Result<User, StorageError>;

    /// Read the admin flag of a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this identifier
    /// * `DatabaseError` - Database operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Read access to registered apps.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Find an app by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No app with this identifier
    /// * `DatabaseError` - Database operation failed
    async fn app(&self, app_id: AppId) -> Result<App, StorageError>;
}
