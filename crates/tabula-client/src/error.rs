//! Error types raised while building and dispatching table requests.
//!
//! Every stage of a round trip has its own `thiserror` enum so callers can
//! match on the failing stage. [`ClientError`] gathers them for the façade
//! and keeps each underlying cause reachable through `source()`.

use std::io;

use thiserror::Error;

/// Misuse of the addressing hierarchy or missing connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The connection parameters carried no host.
    #[error("invalid url: host needs to be set")]
    MissingHost,
    /// A table was named without the database that owns it.
    #[error("invalid url: table '{table}' set but database is not")]
    TableWithoutDatabase {
        /// Table that was requested.
        table: String,
    },
}

/// Failure to turn an envelope into an outbound request.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The envelope could not be serialised to JSON.
    #[error("failed to serialise request envelope: {0}")]
    Serialise(#[source] serde_json::Error),
    /// The address did not form a valid request URL.
    #[error("invalid request url {url}: {source}")]
    Url {
        /// Address the request targeted.
        url: String,
        /// Error reported by the URL parser.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP request could not be assembled from the address and body.
    #[error("failed to build request for {url}: {source}")]
    Request {
        /// Address the request targeted.
        url: String,
        /// Error reported by the `http` request builder.
        #[source]
        source: http::Error,
    },
}

/// The HTTP exchange did not complete.
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    /// Address the request targeted.
    pub url: String,
    /// Error reported by the transport.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl TransportError {
    /// Wraps a transport failure for the given address.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }
}

/// The response body was not an untyped table.
#[derive(Debug, Error)]
#[error("failed to decode table: {0}")]
pub struct DecodeError(#[source] pub serde_json::Error);

/// An untyped table could not be converted into typed cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A column declared a type this client does not know.
    #[error("column '{column}' has unknown type '{kind}'")]
    UnknownType {
        /// Column name.
        column: String,
        /// Declared type name.
        kind: String,
    },
    /// A default or cell did not parse as its column type.
    #[error("value '{value}' in column '{column}' is not a valid {kind}")]
    InvalidValue {
        /// Column name.
        column: String,
        /// Declared type name.
        kind: String,
        /// Offending text.
        value: String,
    },
    /// A row did not have one cell per column.
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RowWidth {
        /// Zero-based row position in the response.
        row: usize,
        /// Column count.
        expected: usize,
        /// Cell count found in the row.
        found: usize,
    },
}

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The address could not be built.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// The request envelope could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EnvelopeError),
    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response body could not be read in full.
    #[error("failed to read response body: {0}")]
    Io(#[source] io::Error),
    /// The response body was not a table.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The decoded table did not convert into typed cells.
    #[error("failed to convert table: {0}")]
    Conversion(#[from] ConversionError),
}
