//! # HTTP Transport
//!
//! [`CarrierTransport`] over HTTPS with JSON documents.
//!
//! Requests are posted to `base_url + endpoint path` with the request body
//! wrapped in an object keyed by the operation name. Any 2xx response with a
//! JSON body is a successful exchange, whatever the reply says inside.
//!
//! # Examples
//!
//! ```ignore
//! use carrier_client::infrastructure::carrier::http_client::HttpTransport;
//!
//! let transport = HttpTransport::new("https://wsbeta.fedex.com:443/web-services", 30_000)?;
//! let response = transport.send(Endpoint::Track, &request).await?;
//! ```

use crate::infrastructure::carrier::config::CarrierConfig;
use crate::infrastructure::carrier::error::{TransportError, TransportResult};
use crate::infrastructure::carrier::traits::{
    CarrierTransport, Endpoint, RequestDocument, ResponseDocument,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Longest response body kept in a status error.
const MAX_ERROR_BODY_LEN: usize = 512;

/// HTTP transport for the carrier web services.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Inner reqwest client.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpTransport {
    /// Creates a transport for `base_url` with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Internal` if the client cannot be created.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| TransportError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    /// Creates a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Internal` if the client cannot be created.
    pub fn from_config(config: &CarrierConfig) -> TransportResult<Self> {
        Self::new(config.base_url(), config.timeout_ms())
    }

    /// Returns the base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Full URL of an endpoint.
    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn handle_response(&self, response: Response) -> TransportResult<ResponseDocument> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map(ResponseDocument::new)
                .map_err(|e| TransportError::protocol(format!("failed to parse response: {}", e)))
        } else {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY_LEN {
                let cut = (0..=MAX_ERROR_BODY_LEN)
                    .rev()
                    .find(|index| body.is_char_boundary(*index))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            Err(TransportError::status(status.as_u16(), body))
        }
    }

    fn map_reqwest_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            TransportError::connection(format!("connection failed: {}", error))
        } else {
            TransportError::connection(format!("HTTP request failed: {}", error))
        }
    }
}

#[async_trait]
impl CarrierTransport for HttpTransport {
    async fn send(
        &self,
        endpoint: Endpoint,
        request: &RequestDocument,
    ) -> TransportResult<ResponseDocument> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, operation = request.operation(), "sending carrier request");

        let response = self
            .client
            .post(&url)
            .json(&request.envelope())
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn track_request() -> RequestDocument {
        RequestDocument::new("TrackRequest", json!({"TrackingNumber": "1234"}))
    }

    #[test]
    fn new_transport() {
        let transport = HttpTransport::new("https://example.com/ws/", 5000).unwrap();
        assert_eq!(transport.timeout_ms(), 5000);
        assert_eq!(transport.url(Endpoint::Rate), "https://example.com/ws/rate/v24");
    }

    #[tokio::test]
    async fn posts_envelope_to_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/track/v16"))
            .and(body_json(json!({"TrackRequest": {"TrackingNumber": "1234"}})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"HighestSeverity": "SUCCESS"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri(), 5000).unwrap();
        let response = transport.send(Endpoint::Track, &track_request()).await.unwrap();

        assert_eq!(response.body()["HighestSeverity"], "SUCCESS");
    }

    #[tokio::test]
    async fn business_failure_is_still_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "HighestSeverity": "ERROR",
                "Notifications": [{"Severity": "ERROR", "Message": "Invalid Postal Code"}]
            })))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri(), 5000).unwrap();
        let response = transport.send(Endpoint::Rate, &track_request()).await;

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri(), 5000).unwrap();
        let error = transport
            .send(Endpoint::Ship, &track_request())
            .await
            .unwrap_err();

        assert_eq!(error, TransportError::status(503, "maintenance"));
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn non_json_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<soap:Envelope/>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri(), 5000).unwrap();
        let error = transport
            .send(Endpoint::Pickup, &track_request())
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Protocol { .. }));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri(), 50).unwrap();
        let error = transport
            .send(Endpoint::Rate, &track_request())
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Timeout { timeout_ms: Some(50), .. }));
    }
}
