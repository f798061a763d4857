//! HTTP transport selection.

use std::fmt;
use std::str::FromStr;

use reqwest::ClientBuilder;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Selects which HTTP transport the client is built on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adapter {
    /// reqwest with protocol negotiation. The platform default.
    #[default]
    Reqwest,
    /// reqwest restricted to HTTP/1.1.
    Http1,
    /// reqwest speaking HTTP/2 with prior knowledge.
    Http2,
}

impl Adapter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adapter::Reqwest => "reqwest",
            Adapter::Http1 => "http1",
            Adapter::Http2 => "http2",
        }
    }

    /// Returns a client builder preconfigured for this transport.
    pub fn client_builder(self) -> ClientBuilder {
        let builder = ClientBuilder::new();
        match self {
            Adapter::Reqwest => builder,
            Adapter::Http1 => builder.http1_only(),
            Adapter::Http2 => builder.http2_prior_knowledge(),
        }
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Adapter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reqwest" | "default" => Ok(Adapter::Reqwest),
            "http1" => Ok(Adapter::Http1),
            "http2" => Ok(Adapter::Http2),
            _ => Err(Error::UnknownAdapter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reqwest() {
        assert_eq!(Adapter::default(), Adapter::Reqwest);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("HTTP1".parse::<Adapter>().unwrap(), Adapter::Http1);
        assert_eq!(" http2 ".parse::<Adapter>().unwrap(), Adapter::Http2);
        assert_eq!("default".parse::<Adapter>().unwrap(), Adapter::Reqwest);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "net_http".parse::<Adapter>().unwrap_err();
        assert!(matches!(err, Error::UnknownAdapter(name) if name == "net_http"));
    }

    #[test]
    fn display_matches_serde_name() {
        for adapter in [Adapter::Reqwest, Adapter::Http1, Adapter::Http2] {
            let json = serde_json::to_string(&adapter).unwrap();
            assert_eq!(json, format!("\"{}\"", adapter));
        }
    }

    #[test]
    fn every_adapter_builds_a_client() {
        for adapter in [Adapter::Reqwest, Adapter::Http1, Adapter::Http2] {
            assert!(adapter.client_builder().build().is_ok());
        }
    }
}
