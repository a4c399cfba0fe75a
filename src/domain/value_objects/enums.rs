//! # Domain Enums
//!
//! Enumeration types for carrier concepts.
//!
//! - [`ServiceVariant`] - The carrier shipping product a request is built for
//! - [`Severity`] - Reply and notification severities
//! - [`CarrierCode`] - Operating company codes used in tracking and pickups
//! - [`TrackingStatus`] - Normalized shipment status derived from scan codes
//!
//! All enums implement `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
//! and Serde traits; the closed ones also implement `FromStr`.

use crate::domain::value_objects::measures::{Dimensions, Weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Carrier shipping product.
///
/// The variant drives every service-specific choice made while building a
/// request: the wire service type, default package measures, reference
/// types and the special services requested.
///
/// # Examples
///
/// ```
/// use carrier_client::domain::value_objects::enums::ServiceVariant;
///
/// assert_eq!(ServiceVariant::SmartPost.as_str(), "SMART_POST");
/// assert_eq!(ServiceVariant::SmartPost.rate_quote_variant(), ServiceVariant::Ground);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceVariant {
    /// Standard ground service.
    #[default]
    #[serde(rename = "FEDEX_GROUND")]
    Ground,
    /// International economy service.
    InternationalEconomy,
    /// Deferred service handed to the postal consolidator for final delivery.
    SmartPost,
}

impl ServiceVariant {
    /// Returns the carrier's service type code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "FEDEX_GROUND",
            Self::InternationalEconomy => "INTERNATIONAL_ECONOMY",
            Self::SmartPost => "SMART_POST",
        }
    }

    /// Returns true for the post-consolidator variant.
    #[inline]
    #[must_use]
    pub const fn is_smart_post(self) -> bool {
        matches!(self, Self::SmartPost)
    }

    /// Variant to quote rates with.
    ///
    /// The rating service returns no rates for SmartPost, so those requests
    /// are quoted as ground.
    #[must_use]
    pub const fn rate_quote_variant(self) -> Self {
        match self {
            Self::SmartPost => Self::Ground,
            other => other,
        }
    }

    /// Package weight used when the commodities carry none.
    #[must_use]
    pub fn default_weight(self) -> Weight {
        match self {
            Self::SmartPost => Weight::pounds(Decimal::new(99, 2)),
            _ => Weight::pounds(Decimal::new(13, 0)),
        }
    }

    /// Package dimensions used when the declared ones are unset.
    #[must_use]
    pub fn default_dimensions(self) -> Dimensions {
        match self {
            Self::SmartPost => Dimensions::inches(6, 5, 5),
            _ => Dimensions::inches(13, 13, 13),
        }
    }

    /// Customer reference type attached to free-text references.
    #[must_use]
    pub const fn reference_type(self) -> &'static str {
        match self {
            Self::SmartPost => "RMA_ASSOCIATION",
            _ => "CUSTOMER_REFERENCE",
        }
    }
}

impl fmt::Display for ServiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceVariant {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "FEDEX_GROUND" | "GROUND" => Ok(Self::Ground),
            "INTERNATIONAL_ECONOMY" => Ok(Self::InternationalEconomy),
            "SMART_POST" | "SMARTPOST" => Ok(Self::SmartPost),
            _ => Err(ParseEnumError::InvalidValue("ServiceVariant", s.to_string())),
        }
    }
}

/// Severity of a reply or of one of its notifications.
///
/// The carrier may send severities this client does not know; they are kept
/// verbatim in [`Severity::Other`] and treated as fatal. Matching is exact:
/// `"success"` is not `SUCCESS`. A reply without a severity defaults to
/// `Other("")`, which is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    /// Request processed.
    Success,
    /// Informational note.
    Note,
    /// Processed with a warning.
    Warning,
    /// Request rejected.
    Error,
    /// Carrier-side failure.
    Failure,
    /// Unrecognized severity.
    Other(String),
}

impl Severity {
    /// Returns true if a reply with this severity must be treated as failed.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Success | Self::Note | Self::Warning)
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Note => "NOTE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Failure => "FAILURE",
            Self::Other(value) => value,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => Self::Success,
            "NOTE" => Self::Note,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "FAILURE" => Self::Failure,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating company code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierCode {
    /// Express.
    #[serde(rename = "FDXE")]
    Express,
    /// Ground.
    #[serde(rename = "FDXG")]
    Ground,
    /// Freight.
    #[serde(rename = "FXFR")]
    Freight,
    /// SmartPost.
    #[serde(rename = "FXSP")]
    SmartPost,
    /// Custom Critical.
    #[serde(rename = "FXCC")]
    CustomCritical,
}

impl CarrierCode {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Express => "FDXE",
            Self::Ground => "FDXG",
            Self::Freight => "FXFR",
            Self::SmartPost => "FXSP",
            Self::CustomCritical => "FXCC",
        }
    }
}

impl fmt::Display for CarrierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierCode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FDXE" => Ok(Self::Express),
            "FDXG" => Ok(Self::Ground),
            "FXFR" => Ok(Self::Freight),
            "FXSP" => Ok(Self::SmartPost),
            "FXCC" => Ok(Self::CustomCritical),
            _ => Err(ParseEnumError::InvalidValue("CarrierCode", s.to_string())),
        }
    }
}

/// Normalized shipment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingStatus {
    /// Moving through the network.
    InTransit,
    /// Held, cancelled or otherwise off the expected path.
    Exception,
    /// On the vehicle for delivery.
    OutForDelivery,
    /// Delivered.
    Delivered,
    /// Status code not recognized.
    Unknown,
}

impl TrackingStatus {
    /// Maps a carrier status code to a normalized status.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "AA" | "AC" | "AF" | "AP" | "AR" | "AX" | "AXA" | "CC" | "CP" | "DP" | "DS" | "ED"
            | "EO" | "FD" | "HL" | "IT" | "LO" | "OF" | "PF" | "PL" | "SE" | "SF" | "SP"
            | "TR" => Self::InTransit,
            "CA" | "DD" | "DE" | "CD" => Self::Exception,
            "AD" | "OD" => Self::OutForDelivery,
            "DL" => Self::Delivered,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InTransit => write!(f, "IN_TRANSIT"),
            Self::Exception => write!(f, "EXCEPTION"),
            Self::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod service_variant {
        use super::*;

        #[test]
        fn wire_codes() {
            assert_eq!(ServiceVariant::Ground.to_string(), "FEDEX_GROUND");
            assert_eq!(
                ServiceVariant::InternationalEconomy.to_string(),
                "INTERNATIONAL_ECONOMY"
            );
            assert_eq!(ServiceVariant::SmartPost.to_string(), "SMART_POST");
        }

        #[test]
        fn serde_matches_wire_codes() {
            for variant in [
                ServiceVariant::Ground,
                ServiceVariant::InternationalEconomy,
                ServiceVariant::SmartPost,
            ] {
                let json = serde_json::to_value(variant).unwrap();
                assert_eq!(json, variant.as_str());
            }
        }

        #[test]
        fn from_str_works() {
            assert_eq!(
                "smart-post".parse::<ServiceVariant>().unwrap(),
                ServiceVariant::SmartPost
            );
            assert!("overnight".parse::<ServiceVariant>().is_err());
        }

        #[test]
        fn smart_post_defaults_are_lighter() {
            let smart_post = ServiceVariant::SmartPost;
            assert_eq!(smart_post.default_weight().value(), Decimal::new(99, 2));
            assert_eq!(smart_post.default_dimensions(), Dimensions::inches(6, 5, 5));
            assert_eq!(
                ServiceVariant::Ground.default_dimensions(),
                Dimensions::inches(13, 13, 13)
            );
        }

        #[test]
        fn reference_type() {
            assert_eq!(ServiceVariant::SmartPost.reference_type(), "RMA_ASSOCIATION");
        }
    }

    mod severity {
        use super::*;

        #[test]
        fn non_fatal_severities() {
            assert!(!Severity::Success.is_fatal());
            assert!(!Severity::Note.is_fatal());
            assert!(!Severity::Warning.is_fatal());
        }

        #[test]
        fn unknown_severity_is_fatal_and_preserved() {
            let severity: Severity = serde_json::from_str("\"CATASTROPHE\"").unwrap();
            assert_eq!(severity, Severity::Other("CATASTROPHE".to_string()));
            assert!(severity.is_fatal());
            assert_eq!(severity.to_string(), "CATASTROPHE");
        }

        #[test]
        fn deserializes_known_values() {
            let severity: Severity = serde_json::from_str("\"ERROR\"").unwrap();
            assert_eq!(severity, Severity::Error);
        }

        #[test]
        fn matching_is_case_sensitive() {
            let severity = Severity::from("success");
            assert_eq!(severity, Severity::Other("success".to_string()));
            assert!(severity.is_fatal());
        }

        #[test]
        fn missing_severity_is_fatal() {
            assert_eq!(Severity::default(), Severity::Other(String::new()));
            assert!(Severity::default().is_fatal());
        }
    }

    mod tracking_status {
        use super::*;

        #[test]
        fn maps_scan_codes() {
            assert_eq!(TrackingStatus::from_code("IT"), TrackingStatus::InTransit);
            assert_eq!(TrackingStatus::from_code("de"), TrackingStatus::Exception);
            assert_eq!(TrackingStatus::from_code("OD"), TrackingStatus::OutForDelivery);
            assert_eq!(TrackingStatus::from_code("DL"), TrackingStatus::Delivered);
            assert_eq!(TrackingStatus::from_code("ZZ"), TrackingStatus::Unknown);
        }
    }

    #[test]
    fn carrier_code_roundtrip() {
        assert_eq!("fdxg".parse::<CarrierCode>().unwrap(), CarrierCode::Ground);
        assert_eq!(CarrierCode::SmartPost.to_string(), "FXSP");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseEnumError::InvalidValue("CarrierCode", "XX".to_string());
        assert_eq!(err.to_string(), "invalid CarrierCode value: 'XX'");
    }
}
