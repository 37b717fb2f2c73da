//! Liveness probe for the table server.

use tabula_config::ConnectionConfig;

use crate::address::Address;
use crate::error::ClientError;
use crate::transport::{Transport, UreqTransport};

/// Sends a plain GET to the server root through `transport`.
///
/// Any HTTP response counts as alive; only an incomplete exchange is an
/// error.
///
/// # Errors
///
/// Returns [`ClientError::Address`] when `config` has no host, and
/// [`ClientError::Transport`] carrying the raw transport failure otherwise.
pub fn check_with<T: Transport>(
    transport: &T,
    config: &ConnectionConfig,
) -> Result<(), ClientError> {
    let root = Address::root(config)?;
    transport.probe(&root.as_url())?;
    Ok(())
}

/// Probes the server described by `config` with the default transport.
///
/// # Errors
///
/// See [`check_with`].
pub fn check(config: &ConnectionConfig) -> Result<(), ClientError> {
    check_with(&UreqTransport::from_connection(config), config)
}
