//! # Shipments, Rate Requests and Pickups
//!
//! The caller-facing inputs of the carrier operations, with the
//! service-dependent derivations the request builder reads from them.

use crate::domain::entities::commodity::Commodities;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    Address, Contact, Dimensions, FromAndTo, ServiceVariant, Weight,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest reference the carrier accepts.
const MAX_REFERENCE_LEN: usize = 20;

/// Days added to the ship timestamp of international shipments.
const INTERNATIONAL_SHIP_DELAY_DAYS: i64 = 9;

/// Lower bound of the weight used for rate quotes, in pounds.
const MIN_RATE_WEIGHT_LB: i64 = 13;

/// Upper bound of the weight used for rate quotes, in pounds.
const MAX_RATE_WEIGHT_LB: i64 = 150;

/// A reference printed on the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerReference {
    /// Reference type code.
    pub customer_reference_type: String,
    /// Sanitized value.
    pub value: String,
}

/// A shipment to create.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shipment {
    /// Origin and destination parties.
    pub from_and_to: FromAndTo,
    /// Email that receives tracking events, if any.
    pub notification_email: Option<String>,
    /// Free-text references.
    pub references: Vec<String>,
    /// Explicit service hint from the caller.
    pub service: Option<String>,
    /// Declared package dimensions.
    pub dimensions: Dimensions,
    /// Name printed on the commercial invoice of international shipments.
    pub originator_name: String,
    /// Declared goods.
    pub commodities: Commodities,
    /// Uploaded letterhead image for the commercial invoice.
    pub letterhead_image_id: Option<String>,
}

impl Shipment {
    /// Returns true if origin and destination are in different countries.
    #[must_use]
    pub fn is_international(&self) -> bool {
        self.from_and_to.is_international()
    }

    /// Returns a copy with its commodities replaced.
    #[must_use]
    pub fn with_commodities(&self, commodities: Commodities) -> Self {
        Self {
            commodities,
            ..self.clone()
        }
    }

    /// How the package reaches the carrier.
    #[must_use]
    pub fn dropoff_type(&self) -> &'static str {
        if self.is_international() {
            "BUSINESS_SERVICE_CENTER"
        } else {
            "REGULAR_PICKUP"
        }
    }

    /// Ship timestamp for a shipment created at `now`.
    #[must_use]
    pub fn ship_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if self.is_international() {
            now + Duration::days(INTERNATIONAL_SHIP_DELAY_DAYS)
        } else {
            now
        }
    }

    /// Package weight: the commodity weight, or the service default.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if commodity weights mix units.
    pub fn weight(&self, variant: ServiceVariant) -> DomainResult<Weight> {
        let weight = self.commodities.weight()?;
        if weight.is_zero() {
            Ok(variant.default_weight())
        } else {
            Ok(weight)
        }
    }

    /// Declared dimensions when valid, otherwise the service default.
    #[must_use]
    pub fn validated_dimensions(&self, variant: ServiceVariant) -> Dimensions {
        if self.dimensions.is_valid() {
            self.dimensions
        } else {
            variant.default_dimensions()
        }
    }

    /// Label references for the resolved service.
    #[must_use]
    pub fn customer_references(&self, variant: ServiceVariant) -> Vec<CustomerReference> {
        self.references
            .iter()
            .map(|reference| CustomerReference {
                customer_reference_type: variant.reference_type().to_string(),
                value: sanitize_reference(reference),
            })
            .collect()
    }
}

/// A rate quote request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateRequest {
    /// Origin and destination parties.
    pub from_and_to: FromAndTo,
    /// Explicit service hint from the caller.
    pub service: Option<String>,
    /// Declared goods.
    pub commodities: Commodities,
}

impl RateRequest {
    /// Creates a rate request.
    #[must_use]
    pub fn new(from_and_to: FromAndTo, commodities: Commodities) -> Self {
        Self {
            from_and_to,
            service: None,
            commodities,
        }
    }

    /// Returns true if origin and destination are in different countries.
    #[must_use]
    pub fn is_international(&self) -> bool {
        self.from_and_to.is_international()
    }

    /// Weight to quote with.
    ///
    /// Commodity weight clamped into 13..=150 lb so that light parcels still
    /// land in a rate tier where the destination matters; 13 lb when the
    /// commodities carry no weight.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if commodity weights mix units.
    pub fn rate_weight(&self) -> DomainResult<Weight> {
        let weight = self.commodities.weight()?;
        let min = Decimal::from(MIN_RATE_WEIGHT_LB);
        if weight.is_zero() {
            return Ok(Weight::pounds(min));
        }
        Ok(weight.clamp(min, Decimal::from(MAX_RATE_WEIGHT_LB)))
    }
}

impl From<&Shipment> for RateRequest {
    fn from(shipment: &Shipment) -> Self {
        Self {
            from_and_to: shipment.from_and_to.clone(),
            service: shipment.service.clone(),
            commodities: shipment.commodities.clone(),
        }
    }
}

/// Where a pickup happens.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PickupLocation {
    /// Contact at the pickup location.
    pub contact: Contact,
    /// Pickup address.
    pub address: Address,
}

/// A pickup to schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pickup {
    /// Where the package is collected.
    pub pickup_location: PickupLocation,
    /// Where the package is going.
    pub to_address: Address,
}

/// A document image to upload for use on trade documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Image {
    /// Image slot, e.g. `IMAGE_1`.
    pub id: String,
    /// Base64 image content.
    pub image: String,
}

/// Strips everything but ASCII alphanumerics and truncates to the carrier's
/// reference length.
#[must_use]
pub fn sanitize_reference(reference: &str) -> String {
    reference
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_REFERENCE_LEN)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::commodity::Commodity;
    use chrono::TimeZone;

    fn route(from_country: &str, to_country: &str) -> FromAndTo {
        FromAndTo {
            from_address: Address::new(vec![], "A", "CA", "90401", from_country),
            to_address: Address::new(vec![], "B", "ON", "M5V", to_country),
            ..Default::default()
        }
    }

    #[test]
    fn sanitize_strips_and_truncates() {
        assert_eq!(sanitize_reference("RMA-123 / order#9"), "RMA123order9");
        assert_eq!(sanitize_reference(&"x".repeat(30)).len(), 20);
    }

    #[test]
    fn references_follow_service() {
        let shipment = Shipment {
            references: vec!["RMA-1".to_string()],
            ..Default::default()
        };
        let refs = shipment.customer_references(ServiceVariant::SmartPost);
        assert_eq!(refs[0].customer_reference_type, "RMA_ASSOCIATION");
        assert_eq!(refs[0].value, "RMA1");
        let refs = shipment.customer_references(ServiceVariant::Ground);
        assert_eq!(refs[0].customer_reference_type, "CUSTOMER_REFERENCE");
    }

    #[test]
    fn international_ships_later_from_service_center() {
        let shipment = Shipment {
            from_and_to: route("US", "CA"),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(shipment.ship_time(now), now + Duration::days(9));
        assert_eq!(shipment.dropoff_type(), "BUSINESS_SERVICE_CENTER");
    }

    #[test]
    fn domestic_ships_now() {
        let shipment = Shipment {
            from_and_to: route("US", "US"),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(shipment.ship_time(now), now);
        assert_eq!(shipment.dropoff_type(), "REGULAR_PICKUP");
    }

    #[test]
    fn weight_falls_back_to_service_default() {
        let shipment = Shipment::default();
        assert_eq!(
            shipment.weight(ServiceVariant::SmartPost).unwrap(),
            ServiceVariant::SmartPost.default_weight()
        );
    }

    #[test]
    fn invalid_dimensions_use_service_default() {
        let shipment = Shipment {
            dimensions: Dimensions::inches(10, 0, 10),
            ..Default::default()
        };
        assert_eq!(
            shipment.validated_dimensions(ServiceVariant::Ground),
            Dimensions::inches(13, 13, 13)
        );
    }

    #[test]
    fn rate_weight_is_clamped() {
        let light = RateRequest::new(
            route("US", "US"),
            Commodities::new(vec![
                Commodity::new("Tee", "US").with_weight(Weight::pounds(Decimal::ONE)),
            ]),
        );
        assert_eq!(light.rate_weight().unwrap().value(), Decimal::new(13, 0));

        let heavy = RateRequest::new(
            route("US", "US"),
            Commodities::new(vec![
                Commodity::new("Anvil", "US").with_weight(Weight::pounds(Decimal::new(500, 0))),
            ]),
        );
        assert_eq!(heavy.rate_weight().unwrap().value(), Decimal::new(150, 0));

        let empty = RateRequest::default();
        assert_eq!(empty.rate_weight().unwrap().value(), Decimal::new(13, 0));
    }
}
