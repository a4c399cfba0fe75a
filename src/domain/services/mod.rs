//! # Domain Services
//!
//! Decision logic that doesn't belong to a single entity.
//!
//! ## Services
//!
//! - [`service_classifier::resolve`]: carrier service selection
//! - [`pickup_scheduler::PickupScheduler`]: pickup ready times across zones
//! - [`reply_classifier::classify`]: business outcome of a decoded reply

pub mod pickup_scheduler;
pub mod reply_classifier;
pub mod service_classifier;

pub use pickup_scheduler::{Clock, FixedClock, PickupScheduler, SystemClock, ZoneTable};
pub use reply_classifier::{BusinessError, classify};
