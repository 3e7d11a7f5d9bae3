//! Common - Shared Interface Types for the Relay Bridge Contracts
//!
//! The messenger, the bridge and the wrapped tokens only talk to each other
//! (and to the external transport) through the message shapes defined here,
//! so every contract can depend on this package without depending on the
//! others.

pub mod asset;
pub mod messenger;
pub mod transport;
pub mod wrapped_token;

pub use asset::AssetInfo;
