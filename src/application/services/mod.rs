//! # Application Services
//!
//! Multi-step workflows that sequence calls against the carrier.
//!
//! - [`CustomsValuationPipeline`]: carrier-computed customs values for
//!   formal-entry shipments

pub mod customs_valuation;

pub use customs_valuation::{CustomsRateSource, CustomsValuationPipeline};
