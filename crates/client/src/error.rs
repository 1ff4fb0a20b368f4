//! Error taxonomy for client operations.
//!
//! Four failure classes, kept distinct because callers treat them
//! differently:
//!
//! - [`ApiError::Validation`] - detected locally, no network call was issued
//! - [`ApiError::Auth`] - the backend rejected the credentials or token (401)
//! - [`ApiError::Network`] - the exchange failed in transit, no complete
//!   response arrived
//! - [`ApiError::Server`] - the backend answered with a non-2xx and a body
//!
//! Store operations always propagate these; they never silently succeed.

use thiserror::Error;

use market_core::{EmailError, QuantityError};

/// Errors surfaced by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected locally before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backend returned 401 (invalid credentials or expired token).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The exchange failed in transit: connect error, timeout, or the
    /// connection dropped before the body was fully read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status and a body.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A successful response body could not be decoded.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Locally detected input errors. No network call is issued for these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum required length.
        min: usize,
    },

    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Seller registration is missing part of the store information.
    #[error("store {0} is required for sellers")]
    MissingSellerField(&'static str),

    /// Quantity out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// Email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Result type alias for [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;
