//! Blocking HTTP transport used by the dispatcher.
//!
//! The [`Transport`] trait keeps the dispatcher independent of the HTTP
//! client so tests can substitute canned responses. The production
//! implementation wraps a `ureq` agent whose global deadline provides the
//! timeout; nothing here retries.

use std::io::Read;
use std::time::Duration;

use http::{Request, Response};
use tabula_config::ConnectionConfig;

use crate::error::TransportError;

/// Response body handed back by a transport.
pub type ResponseBody = Box<dyn Read>;

/// Trait abstracting a synchronous HTTP round trip.
pub trait Transport {
    /// Sends `request` and waits for the response head.
    ///
    /// HTTP error statuses are not failures: the response is returned so its
    /// body can be decoded.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the exchange does not complete, for
    /// example on connection failure or timeout.
    fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<ResponseBody>, TransportError>;

    /// Sends a plain GET to `url` and discards the response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the exchange does not complete.
    fn probe(&self, url: &str) -> Result<(), TransportError>;
}

/// [`Transport`] backed by a blocking `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Creates a transport whose round trips are bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Creates a transport using the deadline from `config`.
    #[must_use]
    pub fn from_connection(config: &ConnectionConfig) -> Self {
        Self::new(config.timeout)
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<Response<ResponseBody>, TransportError> {
        let url = request.uri().to_string();
        let response = self
            .agent
            .run(request)
            .map_err(|error| TransportError::new(url, error))?;
        Ok(response.map(|body| Box::new(body.into_reader()) as ResponseBody))
    }

    fn probe(&self, url: &str) -> Result<(), TransportError> {
        self.agent
            .get(url)
            .call()
            .map(drop)
            .map_err(|error| TransportError::new(url, error))
    }
}
