//! Library root for `relay-bot`.
//!
//! Relay-bot is a webhook relay for chat-room events designed to:
//! - Track mentions of a configured trigger phrase
//! - Answer `/giphy` commands with a random search result
//! - Announce CI deployment status changes
//!
//! Inbound webhooks are answered immediately; the resulting room
//! notification is delivered on a detached background task. The
//! architecture is built around extensible traits that allow for
//! different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay-bot runtime:
/// - Creates the runtime context with the GIF search and notifier clients
/// - Starts the webhook server
pub async fn start(config: Config) -> Void {
    info!("Starting relay-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
