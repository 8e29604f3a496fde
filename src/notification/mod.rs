//! Notification delivery and inbox management for Aalto.
//!
//! Team and task services emit notifications through the fire-and-forget
//! [`ports::NotificationSink`] contract; recipients read, mark, and delete
//! them through the inbox service. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
