//! Runtime services and shared state for the relay-bot.

use std::{sync::Arc, time::Duration};

use tracing::{info, instrument};

use crate::{
    base::{
        config::Config,
        types::{MentionCounter, Res, Void},
    },
    server::{self, AppState},
    service::{giphy::GifClient, notify::NotifierClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the mention counter, GIF search client, notifier
/// client, and configuration. It is designed to be trivially cloneable,
/// allowing it to be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// Process-lifetime mention counter.
    pub counter: Arc<MentionCounter>,
    /// The GIF search client instance.
    pub gif: GifClient,
    /// The notifier client instance.
    pub notifier: NotifierClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // One outbound client with a bounded timeout, shared by every service.
        let http = reqwest::Client::builder().timeout(Duration::from_secs(config.http_timeout_secs)).build()?;

        // Initialize the mention counter.
        let counter = Arc::new(MentionCounter::default());

        // Initialize the GIF search client.
        let gif = GifClient::giphy(&config, http.clone());

        // Initialize the notifier client.
        let notifier = NotifierClient::hipchat(&config, http);

        Ok(Self { config, counter, gif, notifier })
    }

    /// Serve the webhook routes until the listener fails.
    pub async fn start(&self) -> Void {
        let state = AppState {
            config: self.config.clone(),
            counter: self.counter.clone(),
            gif: self.gif.clone(),
            notifier: self.notifier.clone(),
        };

        let app = server::router(state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr.as_str()).await?;

        info!("Listening on {}", self.config.bind_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
