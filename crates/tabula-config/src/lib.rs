//! Shared configuration for the Tabula client and command-line tool.
//!
//! Connection parameters ([`ConnectionConfig`]) are kept separate from the
//! process configuration ([`Config`]) loaded by the binary. Library callers
//! only ever need the former.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod connection;
mod defaults;
mod logging;

pub use connection::{ConnectionConfig, ConnectionParseError, Protocol};
pub use defaults::{
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, default_connection,
    default_log_filter, default_log_filter_string, default_log_format, default_server_string,
    default_timeout_secs,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Process configuration for the `tabula` binary.
///
/// Values are layered by `ortho_config`: command-line flags win over
/// `TABULA_*` environment variables, which win over configuration files,
/// which win over the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TABULA")]
pub struct Config {
    /// Server URL, for example `https://tables.example:8443`.
    #[ortho_config(default = default_server_string())]
    pub server: String,
    /// Opaque session token forwarded with every request.
    #[ortho_config(default = String::new())]
    pub session_id: String,
    /// Round-trip deadline in seconds.
    #[ortho_config(default = default_timeout_secs())]
    pub timeout_secs: u64,
    /// Tracing filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Tracing output format.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server_string(),
            session_id: String::new(),
            timeout_secs: default_timeout_secs(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Resolves the configured server URL into connection parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionParseError`] when the server URL is malformed or
    /// uses a scheme other than `http` or `https`.
    pub fn connection(&self) -> Result<ConnectionConfig, ConnectionParseError> {
        let connection: ConnectionConfig = self.server.parse()?;
        Ok(connection.with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// Session token forwarded with every request.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Tracing output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
