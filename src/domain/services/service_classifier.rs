//! # Service Classifier
//!
//! Resolves the carrier service a shipment or rate request is built for.
//!
//! Rules, first match wins:
//!
//! 1. a SmartPost hint, or a `return` hint on a domestic movement → SmartPost
//! 2. an international economy hint, or an international movement from an
//!    origin enabled for international economy → international economy
//! 3. otherwise → ground
//!
//! Hints match exactly: `FEDEX_SMART_POST` or ` return ` name no known
//! service. A hint that names no known service is not an error; it falls
//! through to rules 2 and 3.
//!
//! # Examples
//!
//! ```
//! use carrier_client::domain::services::service_classifier::resolve;
//! use carrier_client::domain::value_objects::ServiceVariant;
//!
//! assert_eq!(resolve(Some("return"), false, false), ServiceVariant::SmartPost);
//! assert_eq!(resolve(None, true, true), ServiceVariant::InternationalEconomy);
//! assert_eq!(resolve(Some("overnight"), false, true), ServiceVariant::Ground);
//! ```

use crate::domain::value_objects::ServiceVariant;

/// Hint selecting SmartPost.
pub const SMART_POST_HINT: &str = "fedex_smart_post";

/// Hint marking a return movement.
pub const RETURN_HINT: &str = "return";

/// Hint selecting international economy.
pub const INTERNATIONAL_ECONOMY_HINT: &str = "fedex_international_economy";

/// Resolves the service variant.
///
/// # Arguments
///
/// * `hint` - Explicit service hint from the caller, if any
/// * `is_international` - Whether origin and destination countries differ
/// * `origin_ships_international_economy` - Whether the origin is configured
///   for international economy dispatch
#[must_use]
pub fn resolve(
    hint: Option<&str>,
    is_international: bool,
    origin_ships_international_economy: bool,
) -> ServiceVariant {
    let hint = hint.unwrap_or_default();

    if hint == SMART_POST_HINT || (hint == RETURN_HINT && !is_international) {
        return ServiceVariant::SmartPost;
    }

    if hint == INTERNATIONAL_ECONOMY_HINT
        || (is_international && origin_ships_international_economy)
    {
        return ServiceVariant::InternationalEconomy;
    }

    ServiceVariant::Ground
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Shipment;
    use crate::domain::value_objects::Dimensions;
    use proptest::prelude::*;

    #[test]
    fn no_hint_domestic_is_ground() {
        assert_eq!(resolve(None, false, false), ServiceVariant::Ground);
        assert_eq!(resolve(None, false, true), ServiceVariant::Ground);
    }

    #[test]
    fn smart_post_hint_wins_everywhere() {
        assert_eq!(resolve(Some(SMART_POST_HINT), true, true), ServiceVariant::SmartPost);
        assert_eq!(resolve(Some(SMART_POST_HINT), false, false), ServiceVariant::SmartPost);
    }

    #[test]
    fn hints_match_exactly() {
        assert_eq!(resolve(Some("FEDEX_SMART_POST"), false, false), ServiceVariant::Ground);
        assert_eq!(resolve(Some(" return "), false, false), ServiceVariant::Ground);
        assert_eq!(resolve(Some("Return"), false, true), ServiceVariant::Ground);
        assert_eq!(
            resolve(Some("FEDEX_SMART_POST"), true, true),
            ServiceVariant::InternationalEconomy
        );
        assert_eq!(
            resolve(Some("FEDEX_INTERNATIONAL_ECONOMY"), false, false),
            ServiceVariant::Ground
        );
    }

    #[test]
    fn international_return_is_not_smart_post() {
        assert_eq!(resolve(Some(RETURN_HINT), true, false), ServiceVariant::Ground);
        assert_eq!(
            resolve(Some(RETURN_HINT), true, true),
            ServiceVariant::InternationalEconomy
        );
    }

    #[test]
    fn international_economy_needs_hint_or_eligible_origin() {
        assert_eq!(
            resolve(Some(INTERNATIONAL_ECONOMY_HINT), false, false),
            ServiceVariant::InternationalEconomy
        );
        assert_eq!(resolve(None, true, true), ServiceVariant::InternationalEconomy);
        assert_eq!(resolve(None, true, false), ServiceVariant::Ground);
    }

    #[test]
    fn unknown_hint_falls_through() {
        assert_eq!(resolve(Some("overnight"), false, false), ServiceVariant::Ground);
        assert_eq!(
            resolve(Some("overnight"), true, true),
            ServiceVariant::InternationalEconomy
        );
        assert_eq!(resolve(Some(""), true, false), ServiceVariant::Ground);
    }

    proptest! {
        #[test]
        fn domestic_return_is_always_smart_post(
            eligible in any::<bool>(),
            length in 0u32..200,
            width in 0u32..200,
            height in 0u32..200,
        ) {
            let shipment = Shipment {
                service: Some(RETURN_HINT.to_string()),
                dimensions: Dimensions::inches(length, width, height),
                ..Default::default()
            };
            prop_assert_eq!(
                resolve(shipment.service.as_deref(), shipment.is_international(), eligible),
                ServiceVariant::SmartPost
            );
        }

        #[test]
        fn unknown_hints_match_no_hint(hint in "[a-z_]{1,24}", international in any::<bool>(), eligible in any::<bool>()) {
            prop_assume!(
                hint != SMART_POST_HINT && hint != RETURN_HINT && hint != INTERNATIONAL_ECONOMY_HINT
            );
            prop_assert_eq!(
                resolve(Some(&hint), international, eligible),
                resolve(None, international, eligible)
            );
        }
    }
}
