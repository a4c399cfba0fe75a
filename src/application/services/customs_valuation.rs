//! # Customs Valuation
//!
//! Replaces declared commodity values with carrier-computed taxable values
//! for formal-entry shipments.
//!
//! An international shipment whose declared value, in the formal-entry
//! currency, reaches the formal-entry threshold needs a secondary
//! rate-for-customs inquiry before it can be shipped. The reply carries one
//! taxable charge per commodity; each commodity's customs value becomes that
//! charge and its unit price is cleared. Every other shipment passes through
//! untouched.
//!
//! # Examples
//!
//! ```ignore
//! let pipeline = CustomsValuationPipeline::from_config(&config);
//! let commodities = pipeline.resolve(&shipment, &client).await?;
//! let shipment = shipment.with_commodities(commodities);
//! ```

use crate::application::error::{CarrierResult, ValuationError};
use crate::domain::entities::{Commodities, Commodity, RateReply, RateRequest, Shipment};
use crate::domain::value_objects::Money;
use crate::infrastructure::carrier::config::CarrierConfig;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// Source of rate-for-customs replies.
#[async_trait]
pub trait CustomsRateSource: Send + Sync + fmt::Debug {
    /// Issues a rate-for-customs inquiry.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` if the inquiry fails or the carrier rejects it.
    async fn rate_for_customs(&self, request: &RateRequest) -> CarrierResult<RateReply>;
}

/// Two-phase customs valuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomsValuationPipeline {
    currency: String,
    threshold: Decimal,
}

impl CustomsValuationPipeline {
    /// Creates a pipeline with a formal-entry currency and threshold.
    #[must_use]
    pub fn new(currency: impl Into<String>, threshold: Decimal) -> Self {
        Self {
            currency: currency.into(),
            threshold,
        }
    }

    /// Creates a pipeline from the client configuration.
    #[must_use]
    pub fn from_config(config: &CarrierConfig) -> Self {
        Self::new(
            config.formal_entry_currency(),
            config.formal_entry_threshold(),
        )
    }

    /// Formal-entry currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Formal-entry threshold.
    #[inline]
    #[must_use]
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Returns true if the shipment needs carrier-computed customs values.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Declaration` if the declared value cannot be
    /// computed.
    pub fn requires_formal_entry(&self, shipment: &Shipment) -> Result<bool, ValuationError> {
        if !shipment.is_international() {
            return Ok(false);
        }
        Ok(shipment
            .commodities
            .customs_value()?
            .is_some_and(|declared| declared.reaches(&self.currency, self.threshold)))
    }

    /// Resolves the commodities to ship with.
    ///
    /// The shipment itself is never modified; the result is a new list.
    ///
    /// # Errors
    ///
    /// - `ValuationError::Declaration` - Declared value not computable
    /// - `ValuationError::Quote` - The secondary inquiry failed
    /// - `ValuationError::ChargeCountMismatch` - Charges and commodities differ
    /// - `ValuationError::MissingTaxableValue` - A charge had no taxable value
    pub async fn resolve(
        &self,
        shipment: &Shipment,
        source: &dyn CustomsRateSource,
    ) -> Result<Commodities, ValuationError> {
        if !self.requires_formal_entry(shipment)? {
            return Ok(shipment.commodities.clone());
        }

        tracing::info!(
            commodities = shipment.commodities.len(),
            currency = %self.currency,
            threshold = %self.threshold,
            "declared value requires formal entry, requesting taxable values"
        );

        let reply = source
            .rate_for_customs(&RateRequest::from(shipment))
            .await
            .map_err(ValuationError::quote)?;

        apply_taxable_values(&shipment.commodities, reply.taxable_values())
    }
}

fn apply_taxable_values(
    commodities: &Commodities,
    taxable_values: Vec<Option<Money>>,
) -> Result<Commodities, ValuationError> {
    if taxable_values.len() != commodities.len() {
        tracing::warn!(
            charges = taxable_values.len(),
            commodities = commodities.len(),
            "taxable charges do not match commodities"
        );
        return Err(ValuationError::charge_count_mismatch(
            taxable_values.len(),
            commodities.len(),
        ));
    }

    commodities
        .iter()
        .zip(taxable_values)
        .enumerate()
        .map(|(index, (commodity, value))| {
            let value = value.ok_or(ValuationError::MissingTaxableValue { index })?;
            Ok(Commodity {
                customs_value: Some(value),
                unit_price: None,
                ..commodity.clone()
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Commodities::new)
}
