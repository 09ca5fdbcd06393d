//! Error types for pawlike

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pawlike operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Machine-readable error codes returned by the pawlike API.
///
/// Unknown codes collapse into [`ErrorCode::DatabaseError`], which is also what
/// transport failures are reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Authentication & user account
    InvalidEmail,
    EmailAlreadyExists,
    InvalidCredentials,
    UserNotFound,

    // Session management
    InvalidToken,
    JwtError,

    // Image operations
    EmptyImageUrl,
    MalformedUrl,
    InvalidImageExtension,
    InvalidProtocol,
    ImageAlreadyLiked,
    ImageNotLiked,

    // System errors
    FailedHash,
    DatabaseError,
    ExternalApiError,
}

impl ErrorCode {
    /// All known codes, in declaration order.
    pub const ALL: [ErrorCode; 15] = [
        Self::InvalidEmail,
        Self::EmailAlreadyExists,
        Self::InvalidCredentials,
        Self::UserNotFound,
        Self::InvalidToken,
        Self::JwtError,
        Self::EmptyImageUrl,
        Self::MalformedUrl,
        Self::InvalidImageExtension,
        Self::InvalidProtocol,
        Self::ImageAlreadyLiked,
        Self::ImageNotLiked,
        Self::FailedHash,
        Self::DatabaseError,
        Self::ExternalApiError,
    ];

    /// The wire representation of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::EmailAlreadyExists => "email_already_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UserNotFound => "user_not_found",
            Self::InvalidToken => "invalid_token",
            Self::JwtError => "jwt_error",
            Self::EmptyImageUrl => "empty_image_url",
            Self::MalformedUrl => "malformed_url",
            Self::InvalidImageExtension => "invalid_image_extension",
            Self::InvalidProtocol => "invalid_protocol",
            Self::ImageAlreadyLiked => "image_already_liked",
            Self::ImageNotLiked => "image_not_liked",
            Self::FailedHash => "failed_hash",
            Self::DatabaseError => "database_error",
            Self::ExternalApiError => "external_api_error",
        }
    }

    /// Human-readable message suitable for showing to the user.
    ///
    /// Several codes intentionally share a message so that credential probing
    /// and internal failures look the same from the outside.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidEmail => "Please enter a valid email address",
            Self::EmailAlreadyExists => "An account with this email already exists",
            Self::InvalidCredentials | Self::UserNotFound => "Invalid email or password",
            Self::InvalidToken | Self::JwtError => {
                "Your session has expired. Please sign in again"
            }
            Self::EmptyImageUrl => "Please provide an image",
            Self::MalformedUrl => "The provided link is invalid",
            Self::InvalidImageExtension => {
                "Unsupported image format. Please use JPG, PNG, or GIF"
            }
            Self::InvalidProtocol => "Please use a secure (HTTPS) link",
            Self::ImageAlreadyLiked => "You've already liked this image",
            Self::ImageNotLiked => "You haven't liked this image yet",
            Self::FailedHash => "An error occurred during signup. Please try again",
            Self::DatabaseError | Self::ExternalApiError => {
                "Something went wrong. Please try again later"
            }
        }
    }

    /// Parse a wire code, falling back to [`ErrorCode::DatabaseError`].
    pub fn parse(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == code)
            .unwrap_or(Self::DatabaseError)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed API call: a code plus the message to display.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} ({code})")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    /// Build an error carrying the code's standard message.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }

    /// Build an error from a raw wire code (unknown codes become `database_error`).
    pub fn from_code_str(code: Option<&str>) -> Self {
        Self::new(code.map_or(ErrorCode::DatabaseError, ErrorCode::parse))
    }

    /// Check if this error means the session is no longer valid
    pub fn is_session_expired(&self) -> bool {
        matches!(self.code, ErrorCode::InvalidToken | ErrorCode::JwtError)
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Error types for client-side operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote API rejected the call or could not be reached
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An operation that needs a signed-in user was attempted without one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// An image URL failed local checks before being sent
    #[error("Invalid image URL: {0}")]
    InvalidImageUrl(ApiError),

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The API error carried by this error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) | Self::InvalidImageUrl(e) => Some(e),
            Self::NotAuthenticated | Self::Config(_) => None,
        }
    }

    /// Check if this is a not-authenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}
