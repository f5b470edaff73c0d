//! Error type shared by the configuration, locale and formatting layers.

use thiserror::Error;

/// Errors raised while loading configuration or formatting values
#[derive(Debug, Error)]
pub enum Error {
    /// The TOML configuration could not be deserialized
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The embedded locale or currency data is malformed
    #[error("error parsing locale data: {0}")]
    LocaleData(String),

    /// A number pattern was rejected by the parser
    #[error("invalid number pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// A value handed to currency or percent formatting is not a number
    #[error("value '{0}' is not numeric")]
    NotNumeric(String),
}

pub type Result<T> = std::result::Result<T, Error>;
