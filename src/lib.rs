//! # Carrier Client
//!
//! Client for a shipping carrier's web services: rating, shipment creation,
//! tracking, pickup scheduling, delivery notifications and document image
//! upload.
//!
//! The crate is layered the same way throughout:
//!
//! - [`domain`]: value objects, shipment/reply entities and the pure decision
//!   services (service selection, pickup scheduling, reply classification)
//! - [`application`]: the [`CarrierClient`] operation surface and the customs
//!   valuation pipeline that sequences calls against the carrier
//! - [`infrastructure`]: configuration, request documents, the transport port
//!   and its HTTP implementation
//!
//! # Examples
//!
//! ```ignore
//! use carrier_client::{CarrierClient, CarrierConfig};
//!
//! let config = CarrierConfig::from_env()?;
//! let client = CarrierClient::over_http(config)?;
//! let reply = client.track_by_number(CarrierCode::Express, "123456789012").await?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::client::CarrierClient;
pub use application::error::{CarrierError, CarrierResult, Stage, ValuationError};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::services::reply_classifier::BusinessError;
pub use infrastructure::carrier::config::CarrierConfig;
pub use infrastructure::carrier::error::{TransportError, TransportResult};
