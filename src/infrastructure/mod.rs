//! # Infrastructure
//!
//! Adapters to the outside world.

pub mod carrier;
