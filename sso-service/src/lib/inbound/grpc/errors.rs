use tonic::Status;

use super::validation::ValidationErrors;
use crate::domain::auth::errors::AuthError;

pub const INTERNAL_SERVER_ERROR: &str = "internal server error";
pub const INVALID_CREDENTIALS: &str = "invalid email or password";
pub const USER_EXISTS: &str = "user already exists";
pub const USER_NOT_FOUND: &str = "user not found";

impl From<ValidationErrors> for Status {
    fn from(errors: ValidationErrors) -> Self {
        Status::invalid_argument(format!("validation error: {}", errors))
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials { .. } => Status::invalid_argument(INVALID_CREDENTIALS),
            AuthError::UserExists { .. } => Status::already_exists(USER_EXISTS),
            AuthError::UserNotFound { .. } | AuthError::InvalidAppId { .. } => {
                Status::not_found(USER_NOT_FOUND)
            }
            AuthError::Internal { .. } => {
                tracing::error!(op = err.op(), error = %err, "Request failed");
                Status::internal(INTERNAL_SERVER_ERROR)
            }
        }
    }
}
