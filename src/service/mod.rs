//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by the relay-bot:
//! - GIF search services (e.g., Giphy)
//! - Room notification services (e.g., HipChat)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod giphy;
pub mod notify;
