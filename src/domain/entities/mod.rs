//! # Domain Entities
//!
//! Inputs of the carrier operations and the decoded replies.
//!
//! ## Inputs
//!
//! - [`Shipment`]: a shipment to create, with its service-dependent derivations
//! - [`RateRequest`]: a rate quote request
//! - [`Pickup`]: a pickup to schedule
//! - [`Commodities`]: declared goods with customs and weight aggregation
//!
//! ## Replies
//!
//! - [`CarrierReply`]: common severity/notification header of every reply
//! - [`RateReply`], [`ProcessShipmentReply`], [`TrackReply`] and the pickup,
//!   notification and image replies

pub mod commodity;
pub mod reply;
pub mod shipment;

pub use commodity::{Commodities, Commodity};
pub use reply::{
    CancelPickupReply, CarrierReply, CreatePickupReply, DocumentImage, Notification,
    PickupAvailabilityReply, ProcessShipmentReply, RateReply, ReplyHeader,
    SendNotificationsReply, TrackReply, UploadImagesReply,
};
pub use shipment::{CustomerReference, Image, Pickup, PickupLocation, RateRequest, Shipment};
