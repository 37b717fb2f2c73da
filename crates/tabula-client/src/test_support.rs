//! Test doubles shared by the unit tests.

use std::io::Cursor;

use http::{Request, Response};
use mockall::mock;

use crate::error::{ConversionError, DecodeError, TransportError};
use crate::table::{Table, TableDecoder, UntypedTable};
use crate::transport::{ResponseBody, Transport};

mock! {
    pub(crate) HttpTransport {}
    impl Transport for HttpTransport {
        fn execute(
            &self,
            request: Request<Vec<u8>>,
        ) -> Result<Response<ResponseBody>, TransportError>;
        fn probe(&self, url: &str) -> Result<(), TransportError>;
    }
}

mock! {
    pub(crate) Decoder {}
    impl TableDecoder for Decoder {
        fn decode(&self, body: &[u8]) -> Result<UntypedTable, DecodeError>;
        fn convert(&self, table: UntypedTable) -> Result<Table, ConversionError>;
    }
}

/// Wraps a static body in a `200 OK` response.
pub(crate) fn respond_with(body: &'static [u8]) -> Response<ResponseBody> {
    Response::new(Box::new(Cursor::new(body)) as ResponseBody)
}

/// A one-column, one-row table body.
pub(crate) const SINGLE_CELL_TABLE: &[u8] =
    br#"{"name":"t","columns":[{"name":"a","type":"int","default":"0"}],"rows":[["7"]]}"#;
