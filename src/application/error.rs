//! # Application Errors
//!
//! Error types for the carrier operations.
//!
//! Every failure surfaced by [`CarrierClient`](crate::CarrierClient) carries
//! the [`Stage`] it happened in and keeps the underlying error reachable
//! through [`std::error::Error::source`].
//!
//! # Error Hierarchy
//!
//! ```text
//! CarrierError
//! ├── Transport { stage, TransportError }  - Network, HTTP and decoding failures
//! ├── Business { stage, BusinessError }    - Fatal severity inside a reply
//! ├── Domain { stage, DomainError }        - Invalid input data
//! └── Valuation(ValuationError)            - Customs pipeline integrity failures
//!     ├── Quote(CarrierError)              - Secondary quote failed
//!     ├── ChargeCountMismatch              - Charges and commodities differ in count
//!     ├── MissingTaxableValue              - A charge had no taxable value
//!     └── Declaration(DomainError)         - Declared value not computable
//! ```
//!
//! # Examples
//!
//! ```
//! use carrier_client::application::error::{CarrierError, Stage};
//! use carrier_client::TransportError;
//!
//! let err = CarrierError::transport(Stage::Track, TransportError::connection("refused"));
//! assert_eq!(err.stage(), Stage::Track);
//! assert!(err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::services::reply_classifier::BusinessError;
use crate::infrastructure::carrier::error::TransportError;
use std::fmt;
use thiserror::Error;

/// The operation step an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Rate quote.
    Rate,
    /// Secondary rate inquiry for customs values.
    RateForCustoms,
    /// Customs valuation before shipping.
    CustomsPipeline,
    /// Shipment creation.
    Ship,
    /// Pickup creation.
    CreatePickup,
    /// Pickup cancellation.
    CancelPickup,
    /// Pickup availability inquiry.
    PickupAvailability,
    /// Tracking.
    Track,
    /// Tracking notification subscription.
    SendNotifications,
    /// Image upload.
    UploadImages,
}

impl Stage {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::RateForCustoms => "rate for customs",
            Self::CustomsPipeline => "customs pipeline",
            Self::Ship => "ship",
            Self::CreatePickup => "create pickup",
            Self::CancelPickup => "cancel pickup",
            Self::PickupAvailability => "pickup availability",
            Self::Track => "track",
            Self::SendNotifications => "send notifications",
            Self::UploadImages => "upload images",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Customs valuation failure.
///
/// Any of these aborts shipment creation before the shipment request is
/// sent.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// The secondary rate-for-customs inquiry failed.
    #[error("secondary quote failed: {0}")]
    Quote(#[source] Box<CarrierError>),

    /// The quote returned a different number of charges than commodities.
    #[error("quote returned {charges} taxable charges for {commodities} commodities")]
    ChargeCountMismatch {
        /// Charges in the reply.
        charges: usize,
        /// Commodities in the shipment.
        commodities: usize,
    },

    /// A charge had no taxable value.
    #[error("taxable charge {index} has no taxable value")]
    MissingTaxableValue {
        /// Position of the charge.
        index: usize,
    },

    /// The declared value could not be computed.
    #[error("invalid declaration: {0}")]
    Declaration(#[from] DomainError),
}

impl ValuationError {
    /// Wraps a failed secondary quote.
    #[must_use]
    pub fn quote(error: CarrierError) -> Self {
        Self::Quote(Box::new(error))
    }

    /// Creates a count mismatch error.
    #[must_use]
    pub fn charge_count_mismatch(charges: usize, commodities: usize) -> Self {
        Self::ChargeCountMismatch {
            charges,
            commodities,
        }
    }
}

/// Error returned by carrier operations.
#[derive(Debug, Error)]
pub enum CarrierError {
    /// The exchange with the carrier failed.
    #[error("{stage}: {source}")]
    Transport {
        /// Where it failed.
        stage: Stage,
        /// Underlying transport error.
        source: TransportError,
    },

    /// The carrier answered with a fatal severity.
    #[error("{stage}: {source}")]
    Business {
        /// Where it failed.
        stage: Stage,
        /// Severity and message from the reply.
        source: BusinessError,
    },

    /// The request data was invalid.
    #[error("{stage}: {source}")]
    Domain {
        /// Where it failed.
        stage: Stage,
        /// Underlying domain error.
        source: DomainError,
    },

    /// Customs valuation failed.
    #[error("customs pipeline: {0}")]
    Valuation(#[from] ValuationError),
}

impl CarrierError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(stage: Stage, source: TransportError) -> Self {
        Self::Transport { stage, source }
    }

    /// Creates a business error.
    #[must_use]
    pub fn business(stage: Stage, source: BusinessError) -> Self {
        Self::Business { stage, source }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(stage: Stage, source: DomainError) -> Self {
        Self::Domain { stage, source }
    }

    /// The stage the error happened in.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Transport { stage, .. }
            | Self::Business { stage, .. }
            | Self::Domain { stage, .. } => *stage,
            Self::Valuation(_) => Stage::CustomsPipeline,
        }
    }

    /// The business error, if the carrier rejected the request.
    #[must_use]
    pub fn business_error(&self) -> Option<&BusinessError> {
        match self {
            Self::Business { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if the carrier answered with a fatal severity.
    #[must_use]
    pub fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Severity;
    use std::error::Error as _;

    mod stage {
        use super::*;

        #[test]
        fn labels() {
            assert_eq!(Stage::Rate.to_string(), "rate");
            assert_eq!(Stage::CustomsPipeline.to_string(), "customs pipeline");
            assert_eq!(Stage::CreatePickup.to_string(), "create pickup");
        }
    }

    mod carrier_error {
        use super::*;

        #[test]
        fn transport_keeps_source() {
            let err = CarrierError::transport(Stage::Ship, TransportError::status(503, "down"));
            assert_eq!(err.stage(), Stage::Ship);
            assert!(err.to_string().starts_with("ship: "));
            assert!(err.is_retryable());
            assert!(err.source().is_some());
        }

        #[test]
        fn business_is_not_retryable() {
            let err = CarrierError::business(
                Stage::Rate,
                BusinessError::new(Severity::Error, "Invalid Postal Code"),
            );
            assert!(err.is_business());
            assert!(!err.is_retryable());
            assert_eq!(err.business_error().map(BusinessError::message), Some("Invalid Postal Code"));
            assert!(err.to_string().contains("Invalid Postal Code"));
        }

        #[test]
        fn valuation_is_customs_stage() {
            let err: CarrierError = ValuationError::charge_count_mismatch(1, 2).into();
            assert_eq!(err.stage(), Stage::CustomsPipeline);
            assert!(err.to_string().contains("1 taxable charges for 2 commodities"));
        }
    }

    mod valuation_error {
        use super::*;

        #[test]
        fn quote_chains_to_carrier_error() {
            let inner = CarrierError::transport(
                Stage::RateForCustoms,
                TransportError::timeout("slow"),
            );
            let err = ValuationError::quote(inner);
            let source = err.source().map(ToString::to_string).unwrap_or_default();
            assert!(source.starts_with("rate for customs"));
        }

        #[test]
        fn declaration_from_domain() {
            let err: ValuationError = DomainError::MissingValuation { index: 3 }.into();
            assert!(err.to_string().contains("commodity 3"));
        }
    }
}
