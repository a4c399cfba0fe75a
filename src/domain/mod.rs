//! # Domain Layer
//!
//! Shipping concepts and the decisions the client makes about them.
//!
//! - [`value_objects`]: money, measures, addresses and carrier enumerations
//! - [`entities`]: shipments, rate requests, pickups and carrier replies
//! - [`services`]: service selection, pickup scheduling, reply classification
//! - [`errors`]: domain rule violations

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
