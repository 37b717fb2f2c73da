//! Blocking client for a hierarchical table server.
//!
//! The server exposes databases, tables inside databases, and the columns and
//! rows of each table. Every operation is a single HTTP POST whose JSON body
//! carries a textual command and an opaque session token; every response is a
//! table.
//!
//! The pieces compose bottom-up:
//!
//! - [`address`] maps a connection and optional names to a request URL.
//! - [`command`] encodes operations into the command language.
//! - [`envelope`] wraps a command in the request body and builds the request.
//! - [`transport`] performs the HTTP round trip.
//! - [`table`] decodes response bodies and types their cells.
//! - [`dispatch`] runs one round trip and returns a typed [`Table`].
//! - [`Client`] offers one method per entity kind and verb.

pub mod address;
mod client;
pub mod command;
pub mod dispatch;
pub mod envelope;
mod error;
pub mod health;
pub mod table;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use address::{Address, build_address};
pub use client::Client;
pub use command::{CellAssignment, ColumnVerb, Command, RowIndex, RowVerb, StoreVerb};
pub use dispatch::Dispatcher;
pub use envelope::{Envelope, build_request};
pub use error::{
    AddressError, ClientError, ConversionError, DecodeError, EnvelopeError, TransportError,
};
pub use table::{
    Cell, CellType, ColumnDescriptor, JsonTableDecoder, Table, TableDecoder, TypedColumn,
    UntypedTable, bytes_to_untyped, untyped_to_typed,
};
pub use transport::{ResponseBody, Transport, UreqTransport};
