use serde::{ser::Serializer, Serialize};
use thiserror::Error;

/// A specialized `Result` type for the Telphin API crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the Telphin API crate.
///
/// Setting values through [`Configuration::configure`](crate::Configuration::configure)
/// never fails; these variants surface when settings are consumed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Unknown adapter: {0}")]
    UnknownAdapter(String),

    #[error("Invalid option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },
}

impl Error {
    pub(crate) fn invalid_option(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = Error::UnknownAdapter("typhoeus".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Unknown adapter: typhoeus\"");
    }

    #[test]
    fn invalid_option_names_the_key() {
        let err = Error::invalid_option("timeout", "expected a number");
        assert_eq!(err.to_string(), "Invalid option `timeout`: expected a number");
    }
}
