//! Error types for the ADSYNC workspace.
//!
//! Classification findings are never errors: they travel as data inside
//! `ValidationResult` and `SyncPreview`. `AdsyncError` covers the few
//! operations that can genuinely fail, such as loading configuration or
//! decoding a request document.

use thiserror::Error;

/// The unified error type for the ADSYNC crates.
#[derive(Debug, Error)]
pub enum AdsyncError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A field definition carries a regex pattern that does not compile.
    #[error("invalid pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    /// A lookup by (platform, id) found no registered ad type.
    #[error("ad type '{ad_type}' is not registered for platform '{platform}'")]
    UnknownAdType { platform: String, ad_type: String },

    /// A preview request document could not be decoded.
    #[error("request decode error: {reason}")]
    RequestDecode { reason: String },
}

/// Convenience alias used throughout the ADSYNC crates.
pub type AdsyncResult<T> = Result<T, AdsyncError>;
