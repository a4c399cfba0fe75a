//! # Carrier Client
//!
//! The operation surface of the crate.
//!
//! Each operation builds a request document, sends it through the
//! [`CarrierTransport`], decodes the reply and classifies its severity.
//! Transport failures, decoding failures and fatal replies all come back as
//! a [`CarrierError`] tagged with the [`Stage`] they happened in.
//!
//! Two operations sequence more than one exchange:
//!
//! - [`CarrierClient::ship`] runs the customs valuation pipeline first for
//!   international shipments, and never sends the shipment request if it
//!   fails.
//! - [`CarrierClient::create_pickup`] retries with the ready time pushed out
//!   one day at a time, up to the configured maximum delay.
//!
//! # Examples
//!
//! ```ignore
//! use carrier_client::{CarrierClient, CarrierConfig};
//!
//! let client = CarrierClient::over_http(CarrierConfig::from_env()?)?;
//! let reply = client.ship(&shipment).await?;
//! println!("tracking number: {:?}", reply.tracking_number());
//! ```

use crate::application::error::{CarrierError, CarrierResult, Stage};
use crate::application::services::customs_valuation::{
    CustomsRateSource, CustomsValuationPipeline,
};
use crate::domain::entities::{
    CancelPickupReply, CarrierReply, CreatePickupReply, Image, Pickup, PickupAvailabilityReply,
    ProcessShipmentReply, RateReply, RateRequest, SendNotificationsReply, Shipment, TrackReply,
    UploadImagesReply,
};
use crate::domain::services::pickup_scheduler::{Clock, PickupScheduler, SystemClock};
use crate::domain::services::reply_classifier::classify;
use crate::domain::services::service_classifier;
use crate::domain::value_objects::{CarrierCode, FromAndTo, ServiceVariant};
use crate::infrastructure::carrier::config::CarrierConfig;
use crate::infrastructure::carrier::decoder::decode;
use crate::infrastructure::carrier::error::TransportResult;
use crate::infrastructure::carrier::http_client::HttpTransport;
use crate::infrastructure::carrier::request_builder::RequestBuilder;
use crate::infrastructure::carrier::traits::{CarrierTransport, Endpoint, RequestDocument};
use async_trait::async_trait;
use std::sync::Arc;

/// Client for the carrier's web services.
#[derive(Debug, Clone)]
pub struct CarrierClient {
    transport: Arc<dyn CarrierTransport>,
    config: Arc<CarrierConfig>,
    builder: RequestBuilder,
    scheduler: PickupScheduler,
    customs: CustomsValuationPipeline,
    clock: Arc<dyn Clock>,
}

impl CarrierClient {
    /// Creates a client over a transport, using the system clock.
    #[must_use]
    pub fn new(transport: Arc<dyn CarrierTransport>, config: CarrierConfig) -> Self {
        Self::with_clock(transport, config, Arc::new(SystemClock))
    }

    /// Creates a client with an explicit clock.
    #[must_use]
    pub fn with_clock(
        transport: Arc<dyn CarrierTransport>,
        config: CarrierConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            transport,
            builder: RequestBuilder::new(Arc::clone(&config)),
            scheduler: PickupScheduler::new(config.zone_table(), Arc::clone(&clock)),
            customs: CustomsValuationPipeline::from_config(&config),
            config,
            clock,
        }
    }

    /// Creates a client over HTTPS to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Internal` if the HTTP client cannot be created.
    pub fn over_http(config: CarrierConfig) -> TransportResult<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CarrierConfig {
        &self.config
    }

    /// Returns the pickup scheduler.
    #[inline]
    #[must_use]
    pub fn scheduler(&self) -> &PickupScheduler {
        &self.scheduler
    }

    /// Service a shipment between these parties would use.
    #[must_use]
    pub fn resolve_service(&self, route: &FromAndTo, hint: Option<&str>) -> ServiceVariant {
        service_classifier::resolve(
            hint,
            route.is_international(),
            self.config
                .origin_ships_international_economy(&route.from_address),
        )
    }

    /// Quotes a shipment.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::Rate`].
    pub async fn rate(&self, request: &RateRequest) -> CarrierResult<RateReply> {
        let variant = self.resolve_service(&request.from_and_to, request.service.as_deref());
        let document = self
            .builder
            .rate(request, variant, self.clock.now())
            .map_err(|e| CarrierError::domain(Stage::Rate, e))?;
        self.exchange(Stage::Rate, Endpoint::Rate, document).await
    }

    /// Requests per-commodity taxable values for customs.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::RateForCustoms`].
    pub async fn rate_for_customs(&self, request: &RateRequest) -> CarrierResult<RateReply> {
        let document = self
            .builder
            .rate_for_customs(request, self.clock.now())
            .map_err(|e| CarrierError::domain(Stage::RateForCustoms, e))?;
        self.exchange(Stage::RateForCustoms, Endpoint::Rate, document)
            .await
    }

    /// Creates a shipment.
    ///
    /// International shipments at or above the formal-entry threshold are
    /// valued by the carrier first; the shipment request carries the
    /// carrier's taxable values.
    ///
    /// # Errors
    ///
    /// - `CarrierError::Valuation` - Customs valuation failed; nothing was shipped
    /// - Any other `CarrierError` at [`Stage::Ship`]
    pub async fn ship(&self, shipment: &Shipment) -> CarrierResult<ProcessShipmentReply> {
        let variant = self.resolve_service(&shipment.from_and_to, shipment.service.as_deref());
        let commodities = self.customs.resolve(shipment, self).await?;
        let shipment = shipment.with_commodities(commodities);

        tracing::debug!(service = %variant, international = shipment.is_international(), "creating shipment");

        let document = self
            .builder
            .process_shipment(&shipment, variant, self.clock.now())
            .map_err(|e| CarrierError::domain(Stage::Ship, e))?;
        self.exchange(Stage::Ship, Endpoint::Ship, document).await
    }

    /// Schedules a pickup.
    ///
    /// Tries the earliest ready time first, then pushes it out one day per
    /// failed attempt up to the configured maximum delay. Any failure,
    /// including a transport failure, moves on to the next delay.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's `CarrierError` if every attempt fails.
    pub async fn create_pickup(&self, pickup: &Pickup) -> CarrierResult<CreatePickupReply> {
        let max_delay = self.config.max_pickup_delay_days();
        let mut delay = 0;

        loop {
            let ready_time = self
                .scheduler
                .ready_time(&pickup.pickup_location.address, delay);
            let document = self.builder.create_pickup(pickup, &ready_time);

            match self
                .exchange::<CreatePickupReply>(Stage::CreatePickup, Endpoint::Pickup, document)
                .await
            {
                Ok(reply) => {
                    tracing::info!(
                        delay_days = delay,
                        ready_time = %ready_time,
                        confirmation = %reply.pickup_confirmation_number,
                        "pickup scheduled"
                    );
                    return Ok(reply);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        delay_days = delay,
                        ready_time = %ready_time,
                        "pickup attempt failed"
                    );
                    if delay >= max_delay {
                        return Err(e);
                    }
                    delay += 1;
                }
            }
        }
    }

    /// Cancels a scheduled pickup.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::CancelPickup`].
    pub async fn cancel_pickup(&self, confirmation_number: &str) -> CarrierResult<CancelPickupReply> {
        let document = self.builder.cancel_pickup(confirmation_number);
        self.exchange(Stage::CancelPickup, Endpoint::Pickup, document)
            .await
    }

    /// Asks when a pickup is possible at a location.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::PickupAvailability`].
    pub async fn pickup_availability(
        &self,
        pickup: &Pickup,
    ) -> CarrierResult<PickupAvailabilityReply> {
        let document = self.builder.pickup_availability(pickup);
        self.exchange(Stage::PickupAvailability, Endpoint::Pickup, document)
            .await
    }

    /// Tracks a package by tracking number.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::Track`], including when any
    /// track detail in the reply carries a fatal severity.
    pub async fn track_by_number(
        &self,
        carrier: CarrierCode,
        tracking_number: &str,
    ) -> CarrierResult<TrackReply> {
        let document = self.builder.track(carrier, tracking_number);
        self.exchange(Stage::Track, Endpoint::Track, document).await
    }

    /// Subscribes an email address to tracking events.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::SendNotifications`].
    pub async fn send_notifications(
        &self,
        tracking_number: &str,
        email: &str,
    ) -> CarrierResult<SendNotificationsReply> {
        let document = self.builder.send_notifications(tracking_number, email);
        self.exchange(Stage::SendNotifications, Endpoint::Track, document)
            .await
    }

    /// Uploads letterhead and signature images.
    ///
    /// # Errors
    ///
    /// Returns a `CarrierError` at [`Stage::UploadImages`].
    pub async fn upload_images(&self, images: &[Image]) -> CarrierResult<UploadImagesReply> {
        let document = self.builder.upload_images(images);
        self.exchange(Stage::UploadImages, Endpoint::UploadDocument, document)
            .await
    }

    async fn exchange<R: CarrierReply>(
        &self,
        stage: Stage,
        endpoint: Endpoint,
        document: RequestDocument,
    ) -> CarrierResult<R> {
        tracing::debug!(stage = %stage, endpoint = %endpoint, operation = document.operation(), "carrier exchange");

        let response = self
            .transport
            .send(endpoint, &document)
            .await
            .map_err(|e| CarrierError::transport(stage, e))?;
        let reply = decode::<R>(response).map_err(|e| CarrierError::transport(stage, e))?;

        classify(reply).map_err(|e| {
            tracing::warn!(
                stage = %stage,
                severity = %e.severity(),
                message = e.message(),
                "carrier rejected request"
            );
            CarrierError::business(stage, e)
        })
    }
}

#[async_trait]
impl CustomsRateSource for CarrierClient {
    async fn rate_for_customs(&self, request: &RateRequest) -> CarrierResult<RateReply> {
        CarrierClient::rate_for_customs(self, request).await
    }
}
