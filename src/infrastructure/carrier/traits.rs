//! # Carrier Transport Trait
//!
//! Port definition for the exchange of documents with the carrier.
//!
//! The [`CarrierTransport`] trait takes an [`Endpoint`] and a
//! [`RequestDocument`] and returns a [`ResponseDocument`] or a
//! `TransportError`. It knows nothing about the business meaning of either
//! document; the orchestrator decodes and classifies the response.
//!
//! # Examples
//!
//! ```ignore
//! use carrier_client::infrastructure::carrier::traits::{CarrierTransport, Endpoint};
//!
//! #[derive(Debug)]
//! struct RecordingTransport { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl CarrierTransport for RecordingTransport {
//!     // ... implement send
//! }
//! ```

use crate::infrastructure::carrier::error::TransportResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Carrier web service endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Endpoint {
    /// Rating, including rate-for-customs.
    Rate,
    /// Shipment creation.
    Ship,
    /// Pickup creation, cancellation and availability.
    Pickup,
    /// Tracking and tracking notifications.
    Track,
    /// Document image upload.
    UploadDocument,
}

impl Endpoint {
    /// Path relative to the configured base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Rate => "/rate/v24",
            Self::Ship => "/ship/v23",
            Self::Pickup => "/pickup/v17",
            Self::Track => "/track/v16",
            Self::UploadDocument => "/uploaddocument/v11",
        }
    }

    /// Service id sent in the request version block.
    #[must_use]
    pub const fn service_id(self) -> &'static str {
        match self {
            Self::Rate => "crs",
            Self::Ship => "ship",
            Self::Pickup => "disp",
            Self::Track => "trck",
            Self::UploadDocument => "cdus",
        }
    }

    /// Major version sent in the request version block.
    #[must_use]
    pub const fn major_version(self) -> u32 {
        match self {
            Self::Rate => 24,
            Self::Ship => 23,
            Self::Pickup => 17,
            Self::Track => 16,
            Self::UploadDocument => 11,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// An encoded request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDocument {
    operation: &'static str,
    body: Value,
}

impl RequestDocument {
    /// Creates a request document.
    #[must_use]
    pub fn new(operation: &'static str, body: Value) -> Self {
        Self { operation, body }
    }

    /// Operation name, e.g. `RateRequest`.
    #[inline]
    #[must_use]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Request body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The body wrapped in an object keyed by the operation name, as posted
    /// on the wire.
    #[must_use]
    pub fn envelope(&self) -> Value {
        let mut envelope = serde_json::Map::new();
        envelope.insert(self.operation.to_string(), self.body.clone());
        Value::Object(envelope)
    }
}

/// A raw response, not yet decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDocument(Value);

impl ResponseDocument {
    /// Wraps a response body.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// Response body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.0
    }

    /// Consumes the document.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.0
    }
}

impl From<Value> for ResponseDocument {
    fn from(body: Value) -> Self {
        Self(body)
    }
}

/// Trait for carrier transports.
///
/// Implementations enforce timeouts and report network and HTTP failures as
/// `TransportError`. A response with a business failure inside it is still a
/// successful exchange.
#[async_trait]
pub trait CarrierTransport: Send + Sync + fmt::Debug {
    /// Sends a request document to an endpoint.
    ///
    /// # Errors
    ///
    /// - `TransportError::Timeout` - Request timed out
    /// - `TransportError::Connection` - Cannot reach the carrier
    /// - `TransportError::Status` - Non-success HTTP status
    /// - `TransportError::Protocol` - Response is not a document
    async fn send(
        &self,
        endpoint: Endpoint,
        request: &RequestDocument,
    ) -> TransportResult<ResponseDocument>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Rate.path(), "/rate/v24");
        assert_eq!(Endpoint::Ship.path(), "/ship/v23");
        assert_eq!(Endpoint::Pickup.path(), "/pickup/v17");
        assert_eq!(Endpoint::Track.path(), "/track/v16");
        assert_eq!(Endpoint::UploadDocument.path(), "/uploaddocument/v11");
    }

    #[test]
    fn endpoint_versions_match_paths() {
        for endpoint in [
            Endpoint::Rate,
            Endpoint::Ship,
            Endpoint::Pickup,
            Endpoint::Track,
            Endpoint::UploadDocument,
        ] {
            let suffix = format!("/v{}", endpoint.major_version());
            assert!(endpoint.path().ends_with(&suffix));
        }
    }

    #[test]
    fn request_document_accessors() {
        let request = RequestDocument::new("TrackRequest", json!({"a": 1}));
        assert_eq!(request.operation(), "TrackRequest");
        assert_eq!(request.body()["a"], 1);
        assert_eq!(request.envelope(), json!({"TrackRequest": {"a": 1}}));
    }
}
