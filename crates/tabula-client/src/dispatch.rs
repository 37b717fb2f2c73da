//! Request dispatch: one HTTP round trip, one decoded table.

use std::io::Read;

use http::Request;
use tracing::debug;

use crate::error::ClientError;
use crate::table::{Table, TableDecoder};
use crate::transport::Transport;

/// Executes requests and decodes their responses into tables.
///
/// Each call performs exactly one round trip. The body is read in full
/// before decoding starts, and a transport failure returns before the
/// decoder is consulted.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<T, D> {
    transport: T,
    decoder: D,
}

impl<T, D> Dispatcher<T, D>
where
    T: Transport,
    D: TableDecoder,
{
    /// Pairs a transport with a decoder.
    #[must_use]
    pub const fn new(transport: T, decoder: D) -> Self {
        Self { transport, decoder }
    }

    /// Transport used for round trips.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `request` and decodes the response body into a [`Table`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the exchange fails,
    /// [`ClientError::Io`] when the body cannot be read in full,
    /// [`ClientError::Decode`] when the body is not a table, and
    /// [`ClientError::Conversion`] when the table cannot be typed.
    pub fn dispatch(&self, request: Request<Vec<u8>>) -> Result<Table, ClientError> {
        let url = request.uri().to_string();
        debug!(target: "tabula::dispatch", %url, "dispatching request");

        let response = self.transport.execute(request)?;
        let status = response.status();

        let mut body = Vec::new();
        response
            .into_body()
            .read_to_end(&mut body)
            .map_err(ClientError::Io)?;
        debug!(
            target: "tabula::dispatch",
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            "response received"
        );

        let untyped = self.decoder.decode(&body)?;
        Ok(self.decoder.convert(untyped)?)
    }
}
