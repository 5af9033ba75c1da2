//! Notification dispatch for the relay-bot.
//!
//! This module provides the fire-and-forget delivery path: handlers
//! schedule a notification here and answer their own client immediately,
//! while delivery runs on a detached background task.

pub mod dispatch;
