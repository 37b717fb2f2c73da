//! JSON request envelopes.
//!
//! Every query travels as `{"query": "<command>", "sessionId": "<token>"}` in
//! the body of a POST to the target address. The session token is opaque and
//! forwarded unchanged.

use http::header::CONTENT_TYPE;
use http::{Method, Request};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::command::Command;
use crate::error::EnvelopeError;

/// Body of every query request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Encoded command line.
    pub query: String,
    /// Opaque session token; may be empty.
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

impl Envelope {
    /// Wraps an encoded command and session token.
    #[must_use]
    pub fn new(query: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.into(),
        }
    }

    /// Encodes `command` and pairs it with `session_id`.
    #[must_use]
    pub fn for_command(command: &Command, session_id: &str) -> Self {
        Self::new(command.encode(), session_id)
    }

    /// Serialises the envelope to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Serialise`] if serialisation fails.
    pub fn to_json(&self) -> Result<Vec<u8>, EnvelopeError> {
        serde_json::to_vec(self).map_err(EnvelopeError::Serialise)
    }
}

/// Builds the POST request carrying `envelope` to `address`.
///
/// # Errors
///
/// Returns [`EnvelopeError::Serialise`] when the envelope cannot be encoded,
/// [`EnvelopeError::Url`] when the address does not parse as a URL and
/// [`EnvelopeError::Request`] when the request cannot be assembled.
pub fn build_request(
    envelope: &Envelope,
    address: &Address,
) -> Result<Request<Vec<u8>>, EnvelopeError> {
    let body = envelope.to_json()?;
    let target = address
        .to_request_url()
        .map_err(|source| EnvelopeError::Url {
            url: address.as_url(),
            source,
        })?;
    Request::builder()
        .method(Method::POST)
        .uri(target.as_str())
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .map_err(|source| EnvelopeError::Request {
            url: target.into(),
            source,
        })
}
