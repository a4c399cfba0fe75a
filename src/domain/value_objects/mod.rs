//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`Money`]: currency-tagged decimal amount
//! - [`Weight`], [`Dimensions`]: package measures
//! - [`Address`], [`Contact`], [`FromAndTo`]: shipping parties
//! - [`ServiceVariant`], [`Severity`], [`CarrierCode`], [`TrackingStatus`]

pub mod address;
pub mod enums;
pub mod measures;
pub mod money;

pub use address::{Address, Contact, FromAndTo};
pub use enums::{CarrierCode, ParseEnumError, ServiceVariant, Severity, TrackingStatus};
pub use measures::{Dimensions, LengthUnit, Weight, WeightUnit};
pub use money::Money;
