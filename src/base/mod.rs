//! Core components, types, and utilities for the relay-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Wire shapes for inbound events and outbound notifications.
//! - Common types and result handling.

pub mod config;
pub mod types;
