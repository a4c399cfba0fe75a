//! # Commodities
//!
//! Goods declared on a shipment, with the aggregations customs clearance and
//! package rating depend on.
//!
//! # Examples
//!
//! ```
//! use carrier_client::domain::entities::commodity::{Commodities, Commodity};
//! use carrier_client::domain::value_objects::{Money, Weight};
//! use rust_decimal::Decimal;
//!
//! let shirt = Commodity::new("Shirt", "US")
//!     .with_quantity(2)
//!     .with_weight(Weight::pounds(Decimal::new(1, 0)))
//!     .with_unit_price(Money::new("USD", Decimal::new(20, 0)).unwrap());
//! let commodities = Commodities::new(vec![shirt]);
//!
//! let declared = commodities.customs_value().unwrap().unwrap();
//! assert_eq!(declared.amount(), Decimal::new(40, 0));
//! assert_eq!(commodities.weight().unwrap().value(), Decimal::new(2, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Money, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One line of declared goods.
///
/// `unit_price` and `customs_value` are mutually exclusive in an outbound
/// shipment request once customs valuation has run; before that a commodity
/// may carry either or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Commodity {
    /// Short name.
    pub name: String,
    /// Number of pieces.
    pub number_of_pieces: u32,
    /// Free-text description.
    pub description: String,
    /// Country of manufacture (ISO code).
    pub country_of_manufacture: String,
    /// Harmonized tariff code.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub harmonized_code: Option<String>,
    /// Weight of one unit.
    pub weight: Weight,
    /// Number of units.
    pub quantity: u32,
    /// Unit of measure for `quantity`.
    pub quantity_units: String,
    /// Price of one unit.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unit_price: Option<Money>,
    /// Customs value of the whole line.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customs_value: Option<Money>,
}

impl Commodity {
    /// Creates a single-unit commodity with no valuation.
    #[must_use]
    pub fn new(description: impl Into<String>, country_of_manufacture: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            name: description.clone(),
            number_of_pieces: 1,
            description,
            country_of_manufacture: country_of_manufacture.into(),
            harmonized_code: None,
            weight: Weight::default(),
            quantity: 1,
            quantity_units: "EA".to_string(),
            unit_price: None,
            customs_value: None,
        }
    }

    /// Sets the unit count.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the unit weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the unit price.
    #[must_use]
    pub fn with_unit_price(mut self, unit_price: Money) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Sets the customs value.
    #[must_use]
    pub fn with_customs_value(mut self, customs_value: Money) -> Self {
        self.customs_value = Some(customs_value);
        self
    }

    /// Sets the harmonized tariff code.
    #[must_use]
    pub fn with_harmonized_code(mut self, code: impl Into<String>) -> Self {
        self.harmonized_code = Some(code.into());
        self
    }

    /// Declared value of the line: the customs value, or unit price × quantity.
    ///
    /// Returns `None` when neither is present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the product overflows.
    pub fn declared_value(&self) -> DomainResult<Option<Money>> {
        if let Some(customs_value) = &self.customs_value {
            return Ok(Some(customs_value.clone()));
        }
        self.unit_price
            .as_ref()
            .map(|price| price.checked_mul(Decimal::from(self.quantity)))
            .transpose()
    }

    /// Weight of the whole line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the product overflows.
    pub fn line_weight(&self) -> DomainResult<Weight> {
        self.weight.checked_mul(Decimal::from(self.quantity))
    }
}

/// Ordered commodity list of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commodities(Vec<Commodity>);

impl Commodities {
    /// Wraps an ordered list of commodities.
    #[must_use]
    pub fn new(items: Vec<Commodity>) -> Self {
        Self(items)
    }

    /// Returns the commodities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Commodity] {
        &self.0
    }

    /// Consumes the list.
    #[must_use]
    pub fn into_inner(self) -> Vec<Commodity> {
        self.0
    }

    /// Sum of the declared line values, in a single currency.
    ///
    /// Returns `Ok(None)` for an empty list.
    ///
    /// # Errors
    ///
    /// - `DomainError::MissingValuation` if a line has neither customs value
    ///   nor unit price
    /// - `DomainError::CurrencyMismatch` if lines use different currencies
    pub fn customs_value(&self) -> DomainResult<Option<Money>> {
        let mut total: Option<Money> = None;
        for (index, commodity) in self.0.iter().enumerate() {
            let line = commodity
                .declared_value()?
                .ok_or(DomainError::MissingValuation { index })?;
            total = Some(match total {
                None => line,
                Some(sum) => sum.checked_add(&line)?,
            });
        }
        Ok(total)
    }

    /// Sum of the line weights.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WeightUnitMismatch` if lines mix units.
    pub fn weight(&self) -> DomainResult<Weight> {
        self.0.iter().try_fold(Weight::default(), |sum, commodity| {
            sum.checked_add(&commodity.line_weight()?)
        })
    }
}

impl Deref for Commodities {
    type Target = [Commodity];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Commodity>> for Commodities {
    fn from(items: Vec<Commodity>) -> Self {
        Self(items)
    }
}

impl FromIterator<Commodity> for Commodities {
    fn from_iter<I: IntoIterator<Item = Commodity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
