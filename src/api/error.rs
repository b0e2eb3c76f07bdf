/// Error types for the Kroger API client
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the product API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint answered with something other than 200
    #[error("Token request failed ({status}): {body}")]
    TokenRequest { status: StatusCode, body: String },

    /// The token endpoint answered 200 but without a usable `access_token`
    #[error("No access token in response: {body}")]
    MissingAccessToken { body: String },

    /// A response body could not be decoded
    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}
