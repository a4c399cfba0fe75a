//! # Request Builder
//!
//! Encodes carrier requests as [`RequestDocument`]s.
//!
//! There is one builder per operation family. Every service-specific choice
//! (service type, SmartPost detail, special services, label and document
//! specifications, customs clearance) is taken from the resolved
//! [`ServiceVariant`] and the shipment's derivations, so the ground,
//! international economy and SmartPost requests share one code path.

use crate::domain::entities::{Image, Pickup, RateRequest, Shipment};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    Address, CarrierCode, Contact, Dimensions, FromAndTo, ServiceVariant, Weight,
};
use crate::infrastructure::carrier::config::CarrierConfig;
use crate::infrastructure::carrier::traits::{Endpoint, RequestDocument};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Currency rates are quoted in.
const PREFERRED_CURRENCY: &str = "USD";

/// Package weight of a rate-for-customs inquiry without commodity weights.
const CUSTOMS_QUOTE_WEIGHT_LB: i64 = 40;

/// Letterhead image used on commercial invoices when none is given.
const DEFAULT_LETTERHEAD_IMAGE: &str = "IMAGE_1";

/// Signature image used on commercial invoices.
const SIGNATURE_IMAGE: &str = "IMAGE_2";

/// Closing time of the pickup location.
const COMPANY_CLOSE_TIME: &str = "16:00:00";

/// Remark sent with pickup cancellations.
const CANCEL_REMARK: &str = "Accidentally made a pickup.";

/// Business days covered by an availability inquiry.
const AVAILABILITY_BUSINESS_DAYS: u32 = 3;

/// Tracking events subscribed to for email notifications.
const NOTIFICATION_EVENTS: [&str; 5] = [
    "ON_DELIVERY",
    "ON_ESTIMATED_DELIVERY",
    "ON_EXCEPTION",
    "ON_SHIPMENT",
    "ON_TENDER",
];

/// Builds request documents for every carrier operation.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: Arc<CarrierConfig>,
}

impl RequestBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(config: Arc<CarrierConfig>) -> Self {
        Self { config }
    }

    /// Rate quote request.
    ///
    /// SmartPost requests are quoted as ground; the SmartPost detail is
    /// still attached.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if commodity weights mix units.
    pub fn rate(
        &self,
        request: &RateRequest,
        variant: ServiceVariant,
        now: DateTime<Utc>,
    ) -> DomainResult<RequestDocument> {
        let mut shipment = self.requested_shipment(
            &request.from_and_to,
            variant.rate_quote_variant(),
            "REGULAR_PICKUP",
            now,
        );
        shipment.insert("PreferredCurrency".into(), json!(PREFERRED_CURRENCY));
        shipment.insert("ShippingChargesPayment".into(), self.sender_payment());
        insert_some(&mut shipment, "SmartPostDetail", self.smart_post_detail(variant));
        shipment.insert(
            "LabelSpecification".into(),
            json!({"LabelFormatType": "COMMON2D", "ImageType": "PDF"}),
        );
        shipment.insert("RateRequestTypes".into(), json!("PREFERRED"));
        shipment.insert("PackageCount".into(), json!(1));
        shipment.insert(
            "RequestedPackageLineItems".into(),
            json!([line_item(&request.rate_weight()?, &Dimensions::inches(5, 5, 5))]),
        );

        Ok(self.document(
            "RateRequest",
            Endpoint::Rate,
            json!({"RequestedShipment": shipment}),
        ))
    }

    /// Rate inquiry returning per-commodity taxable values for customs.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if commodity values or weights cannot be
    /// aggregated.
    pub fn rate_for_customs(
        &self,
        request: &RateRequest,
        now: DateTime<Utc>,
    ) -> DomainResult<RequestDocument> {
        let mut weight = request.commodities.weight()?;
        if weight.is_zero() {
            weight = Weight::pounds(Decimal::from(CUSTOMS_QUOTE_WEIGHT_LB));
        }

        let mut clearance = Map::new();
        clearance.insert("DutiesPayment".into(), self.sender_payment());
        clearance.insert("DocumentContent".into(), json!("NON_DOCUMENTS"));
        insert_some(
            &mut clearance,
            "CustomsValue",
            request.commodities.customs_value()?.map(|value| json!(value)),
        );
        clearance.insert("Commodities".into(), json!(request.commodities));

        let mut shipment = self.requested_shipment(
            &request.from_and_to,
            ServiceVariant::Ground,
            "REGULAR_PICKUP",
            now,
        );
        shipment.insert("CustomsClearanceDetail".into(), Value::Object(clearance));
        shipment.insert("EdtRequestType".into(), json!("ALL"));
        shipment.insert("PackageCount".into(), json!(1));
        shipment.insert(
            "RequestedPackageLineItems".into(),
            json!([line_item(&weight, &ServiceVariant::SmartPost.default_dimensions())]),
        );

        Ok(self.document(
            "RateRequest",
            Endpoint::Rate,
            json!({"RequestedShipment": shipment}),
        ))
    }

    /// Shipment creation request.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` if commodity values or weights cannot be
    /// aggregated.
    pub fn process_shipment(
        &self,
        shipment: &Shipment,
        variant: ServiceVariant,
        now: DateTime<Utc>,
    ) -> DomainResult<RequestDocument> {
        let mut requested = self.requested_shipment(
            &shipment.from_and_to,
            variant,
            shipment.dropoff_type(),
            shipment.ship_time(now),
        );
        requested.insert("ShippingChargesPayment".into(), self.sender_payment());
        insert_some(&mut requested, "SmartPostDetail", self.smart_post_detail(variant));
        insert_some(
            &mut requested,
            "SpecialServicesRequested",
            self.special_services(shipment, variant),
        );
        insert_some(
            &mut requested,
            "CustomsClearanceDetail",
            self.customs_clearance(shipment)?,
        );
        requested.insert("LabelSpecification".into(), label_specification(shipment));
        insert_some(
            &mut requested,
            "ShippingDocumentSpecification",
            document_specification(shipment, variant),
        );
        requested.insert("PackageCount".into(), json!(1));

        let mut item = line_item(
            &shipment.weight(variant)?,
            &shipment.validated_dimensions(variant),
        );
        if let Value::Object(item) = &mut item {
            item.insert(
                "CustomerReferences".into(),
                json!(shipment.customer_references(variant)),
            );
        }
        requested.insert("RequestedPackageLineItems".into(), json!([item]));

        Ok(self.document(
            "ProcessShipmentRequest",
            Endpoint::Ship,
            json!({"RequestedShipment": requested}),
        ))
    }

    /// Pickup creation request for a ready time.
    #[must_use]
    pub fn create_pickup(&self, pickup: &Pickup, ready_time: &DateTime<Tz>) -> RequestDocument {
        self.document(
            "CreatePickupRequest",
            Endpoint::Pickup,
            json!({
                "OriginDetail": {
                    "UseAccountAddress": false,
                    "PickupLocation": pickup.pickup_location,
                    "PackageLocation": "NONE",
                    "BuildingPart": "SUITE",
                    "BuildingPartDescription": "",
                    "ReadyTimestamp": ready_time.to_rfc3339_opts(SecondsFormat::Secs, false),
                    "CompanyCloseTime": COMPANY_CLOSE_TIME,
                },
                "FreightPickupDetail": {
                    "ApprovedBy": pickup.pickup_location.contact,
                    "Payment": "SENDER",
                    "Role": "SHIPPER",
                    "SubmittedBy": Contact::default(),
                    "LineItems": [{
                        "Service": "INTERNATIONAL_ECONOMY_FREIGHT",
                        "SequenceNumber": 1,
                        "Destination": pickup.to_address,
                        "Packaging": "BAG",
                        "Pieces": 1,
                        "Weight": Weight::pounds(Decimal::ONE),
                        "TotalHandlingUnits": 1,
                        "JustOneMore": false,
                        "Description": "",
                    }],
                },
                "PackageCount": 1,
                "CarrierCode": CarrierCode::Express,
                "Remarks": "",
                "CommodityDescription": "",
            }),
        )
    }

    /// Pickup cancellation request.
    #[must_use]
    pub fn cancel_pickup(&self, confirmation_number: &str) -> RequestDocument {
        self.document(
            "CancelPickupRequest",
            Endpoint::Pickup,
            json!({
                "CarrierCode": CarrierCode::Ground,
                "PickupConfirmationNumber": confirmation_number,
                "Remarks": [CANCEL_REMARK],
            }),
        )
    }

    /// Pickup availability inquiry.
    #[must_use]
    pub fn pickup_availability(&self, pickup: &Pickup) -> RequestDocument {
        self.document(
            "PickupAvailabilityRequest",
            Endpoint::Pickup,
            json!({
                "PickupAddress": pickup.pickup_location.address,
                "PickupRequestType": ["FUTURE_DAY", "SAME_DAY"],
                "NumberOfBusinessDays": AVAILABILITY_BUSINESS_DAYS,
                "Carriers": [CarrierCode::Ground],
            }),
        )
    }

    /// Tracking request for one tracking number.
    #[must_use]
    pub fn track(&self, carrier: CarrierCode, tracking_number: &str) -> RequestDocument {
        self.document(
            "TrackRequest",
            Endpoint::Track,
            json!({
                "SelectionDetails": {
                    "CarrierCode": carrier,
                    "PackageIdentifier": {
                        "Type": "TRACKING_NUMBER_OR_DOORTAG",
                        "Value": tracking_number,
                    },
                },
                "ProcessingOptions": "INCLUDE_DETAILED_SCANS",
            }),
        )
    }

    /// Email notification subscription for a tracking number.
    #[must_use]
    pub fn send_notifications(&self, tracking_number: &str, email: &str) -> RequestDocument {
        self.document(
            "SendNotificationsRequest",
            Endpoint::Track,
            json!({
                "TrackingNumber": tracking_number,
                "SenderEmailAddress": email,
                "SenderContactName": self.config.notification_sender_name(),
                "EventNotificationDetail": self.event_notification_detail("PER_PACKAGE", email),
            }),
        )
    }

    /// Image upload request.
    #[must_use]
    pub fn upload_images(&self, images: &[Image]) -> RequestDocument {
        self.document(
            "UploadImagesRequest",
            Endpoint::UploadDocument,
            json!({"Images": images}),
        )
    }

    fn document(&self, operation: &'static str, endpoint: Endpoint, fields: Value) -> RequestDocument {
        let credentials = self.config.credentials();
        let mut body = Map::new();
        body.insert(
            "WebAuthenticationDetail".into(),
            json!({"UserCredential": {"Key": credentials.key(), "Password": credentials.password()}}),
        );
        body.insert(
            "ClientDetail".into(),
            json!({
                "AccountNumber": credentials.account_number(),
                "MeterNumber": credentials.meter_number(),
            }),
        );
        body.insert(
            "TransactionDetail".into(),
            json!({"CustomerTransactionId": Uuid::new_v4().to_string()}),
        );
        body.insert(
            "Version".into(),
            json!({
                "ServiceId": endpoint.service_id(),
                "Major": endpoint.major_version(),
                "Intermediate": 0,
                "Minor": 0,
            }),
        );
        if let Value::Object(fields) = fields {
            body.extend(fields);
        }
        RequestDocument::new(operation, Value::Object(body))
    }

    fn requested_shipment(
        &self,
        route: &FromAndTo,
        variant: ServiceVariant,
        dropoff_type: &str,
        ship_time: DateTime<Utc>,
    ) -> Map<String, Value> {
        let mut shipment = Map::new();
        shipment.insert(
            "ShipTimestamp".into(),
            json!(ship_time.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        shipment.insert("DropoffType".into(), json!(dropoff_type));
        shipment.insert("ServiceType".into(), json!(variant));
        shipment.insert("PackagingType".into(), json!("YOUR_PACKAGING"));
        shipment.insert(
            "Shipper".into(),
            self.party(&route.from_address, &route.from_contact),
        );
        shipment.insert(
            "Recipient".into(),
            self.party(&route.to_address, &route.to_contact),
        );
        shipment
    }

    fn party(&self, address: &Address, contact: &Contact) -> Value {
        json!({
            "AccountNumber": self.config.credentials().account_number(),
            "Contact": contact,
            "Address": address,
        })
    }

    fn sender_payment(&self) -> Value {
        json!({
            "PaymentType": "SENDER",
            "Payor": {
                "ResponsibleParty": {
                    "AccountNumber": self.config.credentials().account_number(),
                },
            },
        })
    }

    fn smart_post_detail(&self, variant: ServiceVariant) -> Option<Value> {
        variant.is_smart_post().then(|| {
            json!({
                "Indicia": "PARCEL_RETURN",
                "AncillaryEndorsement": "ADDRESS_CORRECTION",
                "HubId": self.config.hub_id(),
            })
        })
    }

    fn special_services(&self, shipment: &Shipment, variant: ServiceVariant) -> Option<Value> {
        let mut types = Vec::new();
        let mut services = Map::new();

        if variant.is_smart_post() {
            types.push("RETURN_SHIPMENT");
            services.insert(
                "ReturnShipmentDetail".into(),
                json!({"ReturnType": "PRINT_RETURN_LABEL"}),
            );
        }
        if shipment.is_international() {
            types.push("ELECTRONIC_TRADE_DOCUMENTS");
            services.insert(
                "EtdDetail".into(),
                json!({"RequestedDocumentCopies": "COMMERCIAL_INVOICE"}),
            );
        }
        if let Some(email) = shipment.notification_email.as_deref().filter(|e| !e.is_empty()) {
            types.push("EVENT_NOTIFICATION");
            services.insert(
                "EventNotificationDetail".into(),
                self.event_notification_detail("PER_SHIPMENT", email),
            );
        }

        if types.is_empty() {
            return None;
        }
        services.insert("SpecialServiceTypes".into(), json!(types));
        Some(Value::Object(services))
    }

    fn event_notification_detail(&self, aggregation: &str, email: &str) -> Value {
        json!({
            "AggregationType": aggregation,
            "EventNotifications": [{
                "Role": "SHIPPER",
                "Events": NOTIFICATION_EVENTS,
                "NotificationDetail": {
                    "NotificationType": "EMAIL",
                    "EmailDetail": {
                        "EmailAddress": email,
                        "Name": self.config.notification_sender_name(),
                    },
                    "Localization": {"LanguageCode": "en"},
                },
                "FormatSpecification": {"Type": "HTML"},
            }],
        })
    }

    fn customs_clearance(&self, shipment: &Shipment) -> DomainResult<Option<Value>> {
        if !shipment.is_international() {
            return Ok(None);
        }

        let mut clearance = Map::new();
        clearance.insert("DutiesPayment".into(), self.sender_payment());
        insert_some(
            &mut clearance,
            "CustomsValue",
            shipment.commodities.customs_value()?.map(|value| json!(value)),
        );
        clearance.insert("Commodities".into(), json!(shipment.commodities));
        clearance.insert("PartiesToTransactionAreRelated".into(), json!(false));
        clearance.insert(
            "CommercialInvoice".into(),
            json!({
                "Purpose": "REPAIR_AND_RETURN",
                "OriginatorName": shipment.originator_name,
            }),
        );
        Ok(Some(Value::Object(clearance)))
    }
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

fn line_item(weight: &Weight, dimensions: &Dimensions) -> Value {
    json!({
        "SequenceNumber": 1,
        "GroupPackageCount": 1,
        "Weight": weight,
        "Dimensions": dimensions,
        "PhysicalPackaging": "BAG",
        "ItemDescription": "Stuff",
    })
}

fn label_specification(shipment: &Shipment) -> Value {
    if shipment.is_international() {
        json!({
            "LabelFormatType": "COMMON2D",
            "ImageType": "PDF",
            "LabelStockType": "PAPER_4X6",
        })
    } else {
        json!({"LabelFormatType": "COMMON2D", "ImageType": "PNG"})
    }
}

fn document_specification(shipment: &Shipment, variant: ServiceVariant) -> Option<Value> {
    if variant.is_smart_post() || !shipment.is_international() {
        return None;
    }
    let letterhead = shipment
        .letterhead_image_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_LETTERHEAD_IMAGE);

    Some(json!({
        "ShippingDocumentTypes": ["COMMERCIAL_INVOICE"],
        "CommercialInvoiceDetail": {
            "Format": {"ImageType": "PDF", "StockType": "PAPER_LETTER"},
            "CustomerImageUsages": [
                {"Type": "LETTER_HEAD", "Id": letterhead},
                {"Type": "SIGNATURE", "Id": SIGNATURE_IMAGE},
            ],
        },
    }))
}
