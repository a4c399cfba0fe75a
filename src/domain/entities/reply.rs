//! # Carrier Replies
//!
//! Decoded reply shapes. Every reply carries a [`ReplyHeader`] with the
//! highest severity and the ordered notifications; whether a reply is a
//! business success is decided from that header, not from the transport
//! status. See `domain::services::reply_classifier`.
//!
//! Only the fields this client reads are modeled; unknown fields are ignored
//! and missing ones default.

use crate::domain::value_objects::{Money, Severity, TrackingStatus};
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::slice;

/// Rate type prefix of the charges billed to the payor.
const PAYOR_RATE_PREFIX: &str = "PAYOR_";

/// Shipment document type of the commercial invoice.
const COMMERCIAL_INVOICE: &str = "COMMERCIAL_INVOICE";

/// One carrier notification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Notification {
    /// Severity of this notification.
    pub severity: Severity,
    /// Subsystem that raised it.
    pub source: String,
    /// Carrier code.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Localized message, when provided.
    pub localized_message: String,
}

impl Notification {
    /// Creates a notification with a severity and message.
    #[must_use]
    pub fn new(severity: impl Into<Severity>, message: impl Into<String>) -> Self {
        Self {
            severity: severity.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Version block echoed by the carrier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionId {
    /// Service identifier, e.g. `crs`.
    #[serde(rename = "ServiceId")]
    pub service_id: String,
    /// Major version.
    pub major: u32,
    /// Intermediate version.
    pub intermediate: u32,
    /// Minor version.
    pub minor: u32,
}

/// Fields common to every reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReplyHeader {
    /// Highest severity among the notifications; unspecified, and so
    /// fatal, when the reply omits it.
    pub highest_severity: Severity,
    /// Ordered notifications.
    pub notifications: Vec<Notification>,
    /// Echoed version.
    pub version: VersionId,
    /// Carrier job id.
    #[serde(rename = "JobId")]
    pub job_id: String,
}

impl ReplyHeader {
    /// Creates a header from a severity and its notifications.
    #[must_use]
    pub fn new(highest_severity: impl Into<Severity>, notifications: Vec<Notification>) -> Self {
        Self {
            highest_severity: highest_severity.into(),
            notifications,
            ..Default::default()
        }
    }
}

/// A decoded carrier reply.
pub trait CarrierReply: DeserializeOwned + Send + 'static {
    /// Reply name, for logs and errors.
    const NAME: &'static str;

    /// The top-level header.
    fn header(&self) -> &ReplyHeader;

    /// Nested severity blocks that can fail the reply on their own, each
    /// with the notifications its message is drawn from.
    fn nested_outcomes(&self) -> Vec<(&Severity, &[Notification])> {
        Vec::new()
    }
}

macro_rules! carrier_reply {
    ($ty:ty, $name:literal) => {
        impl CarrierReply for $ty {
            const NAME: &'static str = $name;

            fn header(&self) -> &ReplyHeader {
                &self.header
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Rate
// ---------------------------------------------------------------------------

/// Reply of the rate service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RateReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// One entry per quoted service.
    pub rate_reply_details: Vec<RateReplyDetail>,
}

carrier_reply!(RateReply, "RateReply");

/// Rates for one service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RateReplyDetail {
    /// Service type code.
    pub service_type: String,
    /// Rated alternatives, e.g. account and list rates.
    pub rated_shipment_details: Vec<RatedShipmentDetail>,
}

/// Wrapper around a shipment rate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RatedShipmentDetail {
    /// The shipment-level rate.
    pub shipment_rate_detail: RateDetail,
}

/// Shipment-level charges.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RateDetail {
    /// Rate type, e.g. `PAYOR_ACCOUNT_SHIPMENT`.
    pub rate_type: String,
    /// Net charge before duties.
    pub total_net_charge: Option<Money>,
    /// Duties and taxes.
    pub total_duties_and_taxes: Option<Money>,
    /// Net charge including duties and taxes.
    pub total_net_charge_with_duties_and_taxes: Option<Money>,
    /// Estimated duties and taxes, one entry per commodity in request order.
    pub duties_and_taxes: Vec<CommodityTax>,
}

/// Estimated duties and taxes of one commodity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CommodityTax {
    /// Harmonized code the estimate was computed for.
    pub harmonized_code: String,
    /// Individual taxes.
    pub taxes: Vec<TaxDetail>,
}

impl CommodityTax {
    /// First taxable value reported for this commodity.
    #[must_use]
    pub fn taxable_value(&self) -> Option<&Money> {
        self.taxes.iter().find_map(|tax| tax.taxable_value.as_ref())
    }
}

/// One tax on a commodity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaxDetail {
    /// Tax type, e.g. `IMPORT_DUTY`.
    pub tax_type: String,
    /// Tax name.
    pub name: String,
    /// Value the tax was computed on.
    pub taxable_value: Option<Money>,
    /// Tax amount.
    pub amount: Option<Money>,
}

impl RateReply {
    /// First rate billed to the payor.
    #[must_use]
    pub fn payor_rate(&self) -> Option<&RateDetail> {
        self.rate_reply_details
            .iter()
            .flat_map(|detail| &detail.rated_shipment_details)
            .map(|rated| &rated.shipment_rate_detail)
            .find(|rate| rate.rate_type.starts_with(PAYOR_RATE_PREFIX))
    }

    /// Total cost including duties and taxes, from the payor rate.
    #[must_use]
    pub fn total_cost(&self) -> Option<&Money> {
        self.payor_rate()?
            .total_net_charge_with_duties_and_taxes
            .as_ref()
    }

    /// Per-commodity taxable values of the payor rate, in request order.
    ///
    /// An entry is `None` when the carrier reported no taxable value for that
    /// commodity. Empty when there is no payor rate.
    #[must_use]
    pub fn taxable_values(&self) -> Vec<Option<Money>> {
        self.payor_rate()
            .map(|rate| {
                rate.duties_and_taxes
                    .iter()
                    .map(|tax| tax.taxable_value().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// Reply of the ship service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProcessShipmentReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// The created shipment.
    pub completed_shipment_detail: CompletedShipmentDetail,
}

carrier_reply!(ProcessShipmentReply, "ProcessShipmentReply");

/// The created shipment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompletedShipmentDetail {
    /// Operating company.
    pub carrier_code: String,
    /// The package, label included.
    pub completed_package_details: CompletedPackageDetails,
    /// Additional documents such as the commercial invoice.
    pub shipment_documents: Vec<ShippingDocument>,
}

/// The created package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompletedPackageDetails {
    /// Tracking ids assigned to the package.
    pub tracking_ids: Vec<TrackingId>,
    /// Shipping label.
    pub label: ShippingDocument,
}

/// A tracking id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackingId {
    /// Id type, e.g. `FEDEX` or `USPS`.
    pub tracking_id_type: String,
    /// Tracking number.
    pub tracking_number: String,
}

/// A generated document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ShippingDocument {
    /// Document type.
    #[serde(rename = "Type")]
    pub document_type: String,
    /// Image format, e.g. `PDF`.
    pub image_type: String,
    /// Document parts.
    pub parts: Vec<DocumentPart>,
}

/// One part of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DocumentPart {
    /// Sequence number.
    pub document_part_sequence_number: String,
    /// Base64 image.
    pub image: String,
}

/// Image content of a document with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentImage {
    /// Base64 image.
    pub image: String,
    /// Image format.
    pub image_type: String,
}

impl ShippingDocument {
    fn first_image(&self) -> Option<DocumentImage> {
        self.parts.first().map(|part| DocumentImage {
            image: part.image.clone(),
            image_type: self.image_type.clone(),
        })
    }
}

impl ProcessShipmentReply {
    /// The shipping label.
    #[must_use]
    pub fn label(&self) -> Option<DocumentImage> {
        self.completed_shipment_detail
            .completed_package_details
            .label
            .first_image()
    }

    /// The commercial invoice, generated for international shipments.
    #[must_use]
    pub fn commercial_invoice(&self) -> Option<DocumentImage> {
        self.completed_shipment_detail
            .shipment_documents
            .iter()
            .filter(|document| document.document_type == COMMERCIAL_INVOICE)
            .find_map(ShippingDocument::first_image)
    }

    /// Tracking number of the package.
    #[must_use]
    pub fn tracking_number(&self) -> Option<&str> {
        self.completed_shipment_detail
            .completed_package_details
            .tracking_ids
            .first()
            .map(|id| id.tracking_number.as_str())
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// Reply of the track service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// One entry per selection.
    pub completed_track_details: Vec<CompletedTrackDetail>,
}

impl CarrierReply for TrackReply {
    const NAME: &'static str = "TrackReply";

    fn header(&self) -> &ReplyHeader {
        &self.header
    }

    fn nested_outcomes(&self) -> Vec<(&Severity, &[Notification])> {
        let mut outcomes = Vec::new();
        for completed in &self.completed_track_details {
            if let Some(severity) = &completed.highest_severity {
                outcomes.push((severity, completed.notifications.as_slice()));
            }
            let notifications = completed
                .track_details
                .iter()
                .filter_map(|detail| detail.notification.as_ref());
            for notification in notifications {
                outcomes.push((&notification.severity, slice::from_ref(notification)));
            }
        }
        outcomes
    }
}

/// Result of one tracking selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CompletedTrackDetail {
    /// Highest severity for this selection, when reported.
    pub highest_severity: Option<Severity>,
    /// Notifications for this selection.
    pub notifications: Vec<Notification>,
    /// Whether more than one shipment matched.
    pub duplicate_waybill: bool,
    /// Matching packages.
    pub track_details: Vec<TrackDetail>,
}

/// Tracking information of one package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrackDetail {
    /// Per-package notification, when reported.
    pub notification: Option<Notification>,
    /// Tracking number.
    pub tracking_number: String,
    /// Current status.
    pub status_detail: StatusDetail,
    /// Operating company.
    pub carrier_code: String,
    /// Key dates.
    pub dates_or_times: Vec<DateOrTime>,
}

/// Current status of a package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusDetail {
    /// Status code, e.g. `DL`.
    pub code: String,
    /// Status description.
    pub description: String,
}

/// A typed date on a package.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DateOrTime {
    /// Date type, e.g. `ACTUAL_DELIVERY`.
    #[serde(rename = "Type")]
    pub date_type: String,
    /// RFC 3339 timestamp.
    pub date_or_timestamp: String,
}

impl TrackDetail {
    /// Normalized status.
    #[must_use]
    pub fn status(&self) -> TrackingStatus {
        TrackingStatus::from_code(&self.status_detail.code)
    }

    fn date_of(&self, date_type: &str) -> Option<DateTime<FixedOffset>> {
        self.dates_or_times
            .iter()
            .filter(|date| date.date_type == date_type)
            .find_map(|date| DateTime::parse_from_rfc3339(&date.date_or_timestamp).ok())
    }

    /// Actual delivery time, once delivered.
    #[must_use]
    pub fn actual_delivery(&self) -> Option<DateTime<FixedOffset>> {
        self.date_of("ACTUAL_DELIVERY")
    }

    /// Estimated delivery time.
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<DateTime<FixedOffset>> {
        self.date_of("ESTIMATED_DELIVERY")
    }
}

impl TrackReply {
    /// First package of the first selection.
    #[must_use]
    pub fn first_track_detail(&self) -> Option<&TrackDetail> {
        self.completed_track_details
            .first()
            .and_then(|completed| completed.track_details.first())
    }

    /// Normalized status of the tracked package.
    #[must_use]
    pub fn status(&self) -> TrackingStatus {
        self.first_track_detail()
            .map_or(TrackingStatus::Unknown, TrackDetail::status)
    }

    /// Actual delivery time of the tracked package.
    #[must_use]
    pub fn actual_delivery(&self) -> Option<DateTime<FixedOffset>> {
        self.first_track_detail()?.actual_delivery()
    }

    /// Estimated delivery time of the tracked package.
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<DateTime<FixedOffset>> {
        self.first_track_detail()?.estimated_delivery()
    }
}

// ---------------------------------------------------------------------------
// Pickup
// ---------------------------------------------------------------------------

/// Reply of a pickup creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreatePickupReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// Confirmation number, needed to cancel.
    pub pickup_confirmation_number: String,
    /// Servicing location.
    pub location: String,
}

carrier_reply!(CreatePickupReply, "CreatePickupReply");

/// Reply of a pickup cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CancelPickupReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
}

carrier_reply!(CancelPickupReply, "CancelPickupReply");

/// Reply of a pickup availability inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PickupAvailabilityReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// Offered pickup windows.
    pub options: Vec<PickupScheduleOption>,
}

carrier_reply!(PickupAvailabilityReply, "PickupAvailabilityReply");

/// One offered pickup window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PickupScheduleOption {
    /// Operating company.
    pub carrier: String,
    /// `SAME_DAY` or `FUTURE_DAY`.
    pub schedule_day: String,
    /// Whether the window can be booked.
    pub available: bool,
    /// Pickup date.
    pub pickup_date: String,
    /// Latest ready time.
    pub cut_off_time: String,
}

impl PickupAvailabilityReply {
    /// Options that can be booked.
    pub fn available_options(&self) -> impl Iterator<Item = &PickupScheduleOption> {
        self.options.iter().filter(|option| option.available)
    }
}

// ---------------------------------------------------------------------------
// Notifications and images
// ---------------------------------------------------------------------------

/// Reply of a tracking notification subscription.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SendNotificationsReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// Whether more data is available.
    pub more_data_available: bool,
}

carrier_reply!(SendNotificationsReply, "SendNotificationsReply");

/// Reply of an image upload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UploadImagesReply {
    /// Common header.
    #[serde(flatten)]
    pub header: ReplyHeader,
    /// Per-image status.
    pub image_statuses: Vec<ImageStatus>,
}

carrier_reply!(UploadImagesReply, "UploadImagesReply");

/// Upload status of one image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageStatus {
    /// Image slot.
    pub id: String,
    /// Upload status.
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    mod rate {
        use super::*;

        fn reply() -> RateReply {
            serde_json::from_value(json!({
                "HighestSeverity": "SUCCESS",
                "Notifications": [{"Severity": "SUCCESS", "Message": "Request was successfully processed."}],
                "RateReplyDetails": [{
                    "ServiceType": "INTERNATIONAL_ECONOMY",
                    "RatedShipmentDetails": [
                        {"ShipmentRateDetail": {
                            "RateType": "RATED_LIST_SHIPMENT",
                            "TotalNetChargeWithDutiesAndTaxes": {"Currency": "USD", "Amount": "99.00"}
                        }},
                        {"ShipmentRateDetail": {
                            "RateType": "PAYOR_ACCOUNT_SHIPMENT",
                            "TotalNetChargeWithDutiesAndTaxes": {"Currency": "USD", "Amount": "42.50"},
                            "DutiesAndTaxes": [
                                {"HarmonizedCode": "6109", "Taxes": [
                                    {"TaxType": "IMPORT_DUTY", "TaxableValue": {"Currency": "USD", "Amount": "500.00"}}
                                ]},
                                {"HarmonizedCode": "6203", "Taxes": [{"TaxType": "IMPORT_DUTY"}]}
                            ]
                        }}
                    ]
                }]
            }))
            .expect("decodes")
        }

        #[test]
        fn total_cost_uses_payor_rate() {
            let cost = reply().total_cost().cloned().unwrap();
            assert_eq!(cost.amount(), Decimal::new(4250, 2));
        }

        #[test]
        fn taxable_values_keep_order_and_gaps() {
            let values = reply().taxable_values();
            assert_eq!(values.len(), 2);
            assert_eq!(values[0].as_ref().unwrap().amount(), Decimal::new(500, 0));
            assert!(values[1].is_none());
        }

        #[test]
        fn no_payor_rate_means_no_values() {
            assert!(RateReply::default().taxable_values().is_empty());
            assert!(RateReply::default().total_cost().is_none());
        }
    }

    mod ship {
        use super::*;

        #[test]
        fn label_and_invoice() {
            let reply: ProcessShipmentReply = serde_json::from_value(json!({
                "HighestSeverity": "NOTE",
                "JobId": "abc",
                "CompletedShipmentDetail": {
                    "CompletedPackageDetails": {
                        "TrackingIds": [{"TrackingIdType": "FEDEX", "TrackingNumber": "7940"}],
                        "Label": {"ImageType": "PNG", "Parts": [{"Image": "bGFiZWw="}]}
                    },
                    "ShipmentDocuments": [
                        {"Type": "OP_900", "ImageType": "PDF", "Parts": [{"Image": "b3A="}]},
                        {"Type": "COMMERCIAL_INVOICE", "ImageType": "PDF", "Parts": [{"Image": "Y2k="}]}
                    ]
                }
            }))
            .expect("decodes");

            assert_eq!(reply.header.job_id, "abc");
            assert_eq!(reply.tracking_number(), Some("7940"));
            let label = reply.label().unwrap();
            assert_eq!(label.image, "bGFiZWw=");
            assert_eq!(label.image_type, "PNG");
            assert_eq!(reply.commercial_invoice().unwrap().image, "Y2k=");
        }

        #[test]
        fn missing_documents() {
            let reply = ProcessShipmentReply::default();
            assert!(reply.label().is_none());
            assert!(reply.commercial_invoice().is_none());
        }
    }

    mod track {
        use super::*;

        fn reply() -> TrackReply {
            serde_json::from_value(json!({
                "HighestSeverity": "SUCCESS",
                "CompletedTrackDetails": [{
                    "HighestSeverity": "SUCCESS",
                    "TrackDetails": [{
                        "Notification": {"Severity": "SUCCESS"},
                        "TrackingNumber": "1234",
                        "StatusDetail": {"Code": "DL", "Description": "Delivered"},
                        "DatesOrTimes": [
                            {"Type": "ESTIMATED_DELIVERY", "DateOrTimestamp": "2024-03-04T17:00:00-05:00"},
                            {"Type": "ACTUAL_DELIVERY", "DateOrTimestamp": "2024-03-04T10:12:00-05:00"}
                        ]
                    }]
                }]
            }))
            .expect("decodes")
        }

        #[test]
        fn status_and_dates() {
            let reply = reply();
            assert_eq!(reply.status(), TrackingStatus::Delivered);
            assert_eq!(
                reply.actual_delivery().unwrap().to_rfc3339(),
                "2024-03-04T10:12:00-05:00"
            );
            assert!(reply.estimated_delivery().is_some());
        }

        #[test]
        fn nested_outcomes_cover_details() {
            let reply = reply();
            assert_eq!(reply.nested_outcomes().len(), 2);
        }

        #[test]
        fn empty_reply_is_unknown() {
            assert_eq!(TrackReply::default().status(), TrackingStatus::Unknown);
        }
    }

    #[test]
    fn pickup_options_filter_available() {
        let reply: PickupAvailabilityReply = serde_json::from_value(json!({
            "HighestSeverity": "SUCCESS",
            "Options": [
                {"Carrier": "FDXG", "ScheduleDay": "SAME_DAY", "Available": false},
                {"Carrier": "FDXG", "ScheduleDay": "FUTURE_DAY", "Available": true}
            ]
        }))
        .expect("decodes");

        let available: Vec<_> = reply.available_options().collect();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].schedule_day, "FUTURE_DAY");
    }
}
