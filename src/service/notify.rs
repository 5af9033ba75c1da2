//! Wrapper around the chat platform's room-notification endpoint.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::base::{
    config::Config,
    types::{RoomNotification, Void},
};

// Traits.

/// Generic "notifier" trait that delivery clients must implement.
#[async_trait]
pub trait GenericNotifier {
    /// Post a notification into a room.
    async fn notify(&self, room_id: u64, notification: &RoomNotification) -> Void;
}

// Structs.

/// Notifier client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct NotifierClient {
    inner: Arc<dyn GenericNotifier + Send + Sync + 'static>,
}

impl Deref for NotifierClient {
    type Target = dyn GenericNotifier + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl NotifierClient {
    /// Creates a new HipChat notifier client.
    pub fn hipchat(config: &Config, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(HipChatNotifier::new(config, http)),
        }
    }

    /// Creates a notifier client from any implementation.
    pub fn new(inner: Arc<dyn GenericNotifier + Send + Sync + 'static>) -> Self {
        Self { inner }
    }
}

// Specific implementations.

/// HipChat notifier implementation.
#[derive(Clone)]
struct HipChatNotifier {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
}

impl HipChatNotifier {
    fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
            auth_token: config.auth_token.clone(),
        }
    }
}

#[async_trait]
impl GenericNotifier for HipChatNotifier {
    #[instrument(skip(self, notification))]
    async fn notify(&self, room_id: u64, notification: &RoomNotification) -> Void {
        let url = format!("{}/room/{}/notification", self.base_url, room_id);

        let response = self
            .http
            .post(&url)
            .query(&[("auth_token", self.auth_token.as_str())])
            .json(notification)
            .send()
            .await?;

        // The remote status is not inspected, only logged. Consuming the
        // body also releases the connection on every path.
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        info!("Notification response ({}): {}", status, body);

        Ok(())
    }
}
