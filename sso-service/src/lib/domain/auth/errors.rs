use thiserror::Error;

/// Failures reported by the user and app stores.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Underlying cause of an internal failure. Never shown to callers.
#[derive(Debug, Clone, Error)]
pub enum InternalError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Password(#[from] auth::PasswordError),

    #[error(transparent)]
    Token(#[from] auth::JwtError),

    #[error("store assigned non-positive user id {0}")]
    InvalidUserId(i64),
}

/// Errors returned by the authentication core.
///
/// Every variant records the operation that produced it. Callers match on the
/// variant only; `op` and the wrapped cause are for logs.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{op}: invalid credentials")]
    InvalidCredentials { op: &'static str },

    #[error("{op}: user already exists")]
    UserExists { op: &'static str },

    #[error("{op}: user not found")]
    UserNotFound { op: &'static str },

    #[error("{op}: invalid app id")]
    InvalidAppId { op: &'static str },

    #[error("{op}: {source}")]
    Internal {
        op: &'static str,
        #[source]
        source: InternalError,
    },
}

impl AuthError {
    pub fn internal(op: &'static str, source: impl Into<InternalError>) -> Self {
        AuthError::Internal {
            op,
            source: source.into(),
        }
    }

    /// Name of the operation that failed.
    pub fn op(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { op }
            | AuthError::UserExists { op }
            | AuthError::UserNotFound { op }
            | AuthError::InvalidAppId { op }
            | AuthError::Internal { op, .. } => op,
        }
    }
}
