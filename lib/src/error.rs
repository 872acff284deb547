//! Error types for the anypay library.

use thiserror::Error;

/// Result type alias for anypay operations.
pub type Result<T> = std::result::Result<T, AnypayError>;

#[derive(Error, Debug)]
pub enum AnypayError {
    // ==================== Transport & Protocol ====================
    /// The request never produced a response (connection, DNS, TLS, timeout).
    #[error("Network request failed: {0}")]
    Transport(String),

    /// The server answered, but not with a usable JSON document.
    #[error("Unexpected response from AnyPay: {0}")]
    Protocol(String),

    #[error("AnyPay returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The server understood the request and rejected it.
    #[error("AnyPay rejected the request (code {code}): {message}")]
    Api { code: i64, message: String },

    /// The JSON parsed but does not match the expected record shape.
    #[error("Could not decode AnyPay response: {0}")]
    Decoding(String),

    // ==================== Caller Input ====================
    #[error("{0}")]
    Configuration(String),

    #[error("Cannot build request signature: {0}")]
    Signing(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    // ==================== Config File ====================
    #[error("{0}")]
    InvalidConfig(String),

    #[error("Could not find config directory. Pass --config or ensure your home directory is accessible.")]
    NoConfigDir,

    #[error("Invalid config file format: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to save config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AnypayError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a decoding error
    pub fn decoding(msg: impl Into<String>) -> Self {
        Self::Decoding(msg.into())
    }

    /// Create a configuration (missing precondition) error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a signing error
    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// True when the server answered with something other than a usable payload.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_) | Self::HttpStatus { .. })
    }
}
