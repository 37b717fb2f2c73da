//! Connection parameters for reaching a table server.
//!
//! These values describe only how a client reaches the server: scheme, host,
//! port and the deadline applied to each round trip. They are passed into
//! every client call and never held in global state.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use url::Url;

use crate::defaults::DEFAULT_TIMEOUT_SECS;

/// URL scheme used to reach the server.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Protocol {
    /// Plain HTTP.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// Maps the legacy boolean HTTPS switch onto a protocol.
    #[must_use]
    pub const fn from_https_flag(https: bool) -> Self {
        if https { Self::Https } else { Self::Http }
    }

    /// Scheme prefix, including the `://` separator.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }
}

/// Parameters needed to address the server.
///
/// `host` is mandatory but is not checked here: address construction
/// revalidates it on every call, so an empty host surfaces as an address
/// error at the point of use.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Scheme used for every request.
    pub protocol: Protocol,
    /// Host name or IP address of the server.
    pub host: String,
    /// Port as text; empty means the scheme default.
    #[serde(default)]
    pub port: String,
    /// Deadline applied by the transport to a whole round trip.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Builds connection parameters with the default timeout.
    #[must_use]
    pub fn new(protocol: Protocol, host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            protocol,
            host: host.into(),
            port: port.into(),
            timeout: default_timeout(),
        }
    }

    /// Replaces the round-trip deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        crate::defaults::default_connection()
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.protocol.prefix(), self.host)?;
        if !self.port.is_empty() {
            write!(formatter, ":{}", self.port)?;
        }
        Ok(())
    }
}

impl FromStr for ConnectionConfig {
    type Err = ConnectionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        let protocol = url
            .scheme()
            .parse::<Protocol>()
            .map_err(|_| ConnectionParseError::UnsupportedScheme(url.scheme().to_owned()))?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConnectionParseError::MissingHost(input.to_owned()))?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(ConnectionParseError::UnexpectedPath(input.to_owned()));
        }
        let port = url.port().map(|port| port.to_string()).unwrap_or_default();
        Ok(Self::new(protocol, host, port))
    }
}

/// Errors encountered while parsing a [`ConnectionConfig`] from a URL.
#[derive(Debug, Error)]
pub enum ConnectionParseError {
    /// Scheme was neither `http` nor `https`.
    #[error("unsupported server scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host name was missing.
    #[error("missing server host in '{0}'")]
    MissingHost(String),
    /// URL named a path, query or fragment; databases and tables are
    /// addressed per request instead.
    #[error("server url '{0}' must not carry a path, query or fragment")]
    UnexpectedPath(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

const fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(value.as_secs())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
