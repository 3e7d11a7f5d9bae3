//! Testing Utilities
//!
//! Provides the pieces integration tests need to stand up two domains in one
//! `cw-multi-test` app:
//!
//! - `transport` - mock transport contract with an outbox and a forwarder
//! - `relay` - helpers that carry outbox deliveries to the other domain

pub mod relay;
pub mod transport;

pub use relay::*;
pub use transport::{mock_transport_contract, Delivery, DeliveryCountResponse};
