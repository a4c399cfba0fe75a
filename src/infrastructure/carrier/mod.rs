//! # Carrier Integration
//!
//! Everything that touches the carrier's web services.
//!
//! - [`config`]: credentials, endpoints and tunables
//! - [`request_builder`]: request documents for each operation
//! - [`traits`]: the [`CarrierTransport`] port
//! - [`http_client`]: the HTTPS transport
//! - [`decoder`]: typed decoding of response documents

pub mod config;
pub mod decoder;
pub mod error;
pub mod http_client;
pub mod request_builder;
pub mod traits;

pub use config::{CarrierConfig, ConfigError, Credentials};
pub use decoder::decode;
pub use error::{TransportError, TransportResult};
pub use http_client::HttpTransport;
pub use request_builder::RequestBuilder;
pub use traits::{CarrierTransport, Endpoint, RequestDocument, ResponseDocument};
