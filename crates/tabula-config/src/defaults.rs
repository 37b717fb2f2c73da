use crate::connection::{ConnectionConfig, Protocol};
use crate::logging::LogFormat;

/// Default host contacted when no server is configured.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the table server.
pub const DEFAULT_PORT: &str = "5678";

/// Default request deadline, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Returns [`DEFAULT_LOG_FILTER`] for callers that want a borrowed filter.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default server URL, rendered from the default connection parameters.
pub fn default_server_string() -> String {
    default_connection().to_string()
}

/// Default request deadline, in seconds.
pub fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection parameters used when nothing else is configured.
pub fn default_connection() -> ConnectionConfig {
    ConnectionConfig::new(Protocol::Http, DEFAULT_HOST, DEFAULT_PORT)
}
