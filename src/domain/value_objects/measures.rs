//! # Weights and Dimensions
//!
//! Package measures with their unit enumerations.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::ParseEnumError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mass unit accepted by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightUnit {
    /// Pounds.
    #[default]
    Lb,
    /// Kilograms.
    Kg,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lb => write!(f, "LB"),
            Self::Kg => write!(f, "KG"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LB" | "LBS" => Ok(Self::Lb),
            "KG" | "KGS" => Ok(Self::Kg),
            _ => Err(ParseEnumError::InvalidValue("WeightUnit", s.to_string())),
        }
    }
}

/// Length unit accepted by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LengthUnit {
    /// Inches.
    #[default]
    In,
    /// Centimeters.
    Cm,
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Cm => write!(f, "CM"),
        }
    }
}

/// A weight with its unit.
///
/// # Examples
///
/// ```
/// use carrier_client::domain::value_objects::measures::Weight;
/// use rust_decimal::Decimal;
///
/// let light = Weight::pounds(Decimal::new(2, 0));
/// let clamped = light.clamp(Decimal::new(13, 0), Decimal::new(150, 0));
/// assert_eq!(clamped.value(), Decimal::new(13, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weight {
    units: WeightUnit,
    value: Decimal,
}

impl Weight {
    /// Creates a weight.
    #[must_use]
    pub fn new(units: WeightUnit, value: Decimal) -> Self {
        Self { units, value }
    }

    /// Creates a weight in pounds.
    #[must_use]
    pub fn pounds(value: Decimal) -> Self {
        Self::new(WeightUnit::Lb, value)
    }

    /// Returns the unit.
    #[inline]
    #[must_use]
    pub fn units(&self) -> WeightUnit {
        self.units
    }

    /// Returns the numeric value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the weight carries no mass.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Adds two weights of the same unit.
    ///
    /// A zero weight adopts the other operand's unit so that an empty
    /// accumulator can start a sum in any unit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WeightUnitMismatch` for mixed non-zero units.
    pub fn checked_add(&self, other: &Weight) -> DomainResult<Weight> {
        if self.is_zero() {
            return Ok(*other);
        }
        if other.is_zero() {
            return Ok(*self);
        }
        if self.units != other.units {
            return Err(DomainError::WeightUnitMismatch {
                expected: self.units.to_string(),
                actual: other.units.to_string(),
            });
        }
        let value = self
            .value
            .checked_add(other.value)
            .ok_or(DomainError::Overflow("weight sum"))?;
        Ok(Self::new(self.units, value))
    }

    /// Multiplies the weight by a count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the product overflows.
    pub fn checked_mul(&self, factor: Decimal) -> DomainResult<Weight> {
        let value = self
            .value
            .checked_mul(factor)
            .ok_or(DomainError::Overflow("weight product"))?;
        Ok(Self::new(self.units, value))
    }

    /// Clamps the value into `[min, max]`, keeping the unit.
    #[must_use]
    pub fn clamp(&self, min: Decimal, max: Decimal) -> Weight {
        Self::new(self.units, self.value.max(min).min(max))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.units)
    }
}

/// Package dimensions.
///
/// Dimensions are only meaningful when every side is positive; otherwise the
/// whole value is treated as unset and callers substitute a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimensions {
    length: u32,
    width: u32,
    height: u32,
    units: LengthUnit,
}

impl Dimensions {
    /// Creates dimensions.
    #[must_use]
    pub fn new(length: u32, width: u32, height: u32, units: LengthUnit) -> Self {
        Self {
            length,
            width,
            height,
            units,
        }
    }

    /// Creates dimensions in inches.
    #[must_use]
    pub fn inches(length: u32, width: u32, height: u32) -> Self {
        Self::new(length, width, height, LengthUnit::In)
    }

    /// Returns the length.
    #[inline]
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the unit.
    #[inline]
    #[must_use]
    pub fn units(&self) -> LengthUnit {
        self.units
    }

    /// Returns true if every side is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.length > 0 && self.width > 0 && self.height > 0
    }
}
