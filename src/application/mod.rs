//! # Application Layer
//!
//! The [`CarrierClient`](client::CarrierClient) operations, their error
//! types and the workflows they run.

pub mod client;
pub mod error;
pub mod services;
