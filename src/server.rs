//! HTTP routes that accept chat-platform webhooks.
//!
//! Each handler decodes the raw body itself so that a malformed request
//! maps to a server-error status and a log line, never to a process
//! exit. Successful JSON routes answer with no content immediately after
//! scheduling delivery; only the Slack-style route answers with a body.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, instrument};

use crate::{
    base::{
        config::Config,
        types::{Color, DeployEvent, MentionCounter, MessageFormat, RoomEvent, RoomNotification, SlackGifCommand},
    },
    interaction::dispatch,
    service::{giphy::GifClient, notify::NotifierClient},
};

/// Command prefix that identifies a GIF search request.
pub const GIF_COMMAND_PREFIX: &str = "/giphy";

/// Shared state for all webhook handlers.
#[derive(Clone)]
pub struct AppState {
    /// The configuration for the application.
    pub config: Config,
    /// Process-lifetime mention counter.
    pub counter: Arc<MentionCounter>,
    /// The GIF search client instance.
    pub gif: GifClient,
    /// The notifier client instance.
    pub notifier: NotifierClient,
}

/// Build the webhook router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mention", post(handle_mention))
        .route("/gifsearch", post(handle_gif_search))
        .route("/deploy", post(handle_deploy))
        .route("/slack/gifsearch", post(handle_slack_gif_search))
        .with_state(state)
}

/// Decode a JSON body, mapping failure to a server-error status.
///
/// A malformed body is a per-request failure; the process keeps serving.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, StatusCode> {
    serde_json::from_str(body).map_err(|err| {
        error!("Failed to decode request body: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Count a mention of the configured trigger phrase and announce the new total.
#[instrument(skip_all)]
async fn handle_mention(State(state): State<AppState>, body: String) -> Response {
    let event = match decode::<RoomEvent>(&body) {
        Ok(event) => event,
        Err(status) => return status.into_response(),
    };

    debug!("Mention event: {:?}", event);

    let count = state.counter.increment();
    let trigger = &state.config.mention_trigger;

    let notification = RoomNotification {
        color: Color::Yellow,
        message: format!("({trigger}) {trigger} has been mentioned {count} times."),
        message_format: MessageFormat::Text,
        notify: false,
    };

    dispatch::dispatch(state.notifier.clone(), state.config.default_room_id, notification);

    StatusCode::NO_CONTENT.into_response()
}

/// Answer a `/giphy` command with a random search result.
#[instrument(skip_all)]
async fn handle_gif_search(State(state): State<AppState>, body: String) -> Response {
    let event = match decode::<RoomEvent>(&body) {
        Ok(event) => event,
        Err(status) => return status.into_response(),
    };

    // The message text must carry the command prefix; anything else is a
    // malformed request.
    let query = match event.message_text().and_then(|text| text.strip_prefix(GIF_COMMAND_PREFIX)) {
        Some(rest) => rest.trim().to_string(),
        None => {
            error!("Gif search event is missing a `{}` message", GIF_COMMAND_PREFIX);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let message = state.gif.search_message(&query).await;

    let notification = RoomNotification {
        color: Color::Purple,
        message,
        message_format: MessageFormat::Text,
        notify: true,
    };

    dispatch::dispatch(state.notifier.clone(), state.config.default_room_id, notification);

    StatusCode::NO_CONTENT.into_response()
}

/// Announce a CI deployment status change in the room named by the payload.
#[instrument(skip_all)]
async fn handle_deploy(State(state): State<AppState>, body: String) -> Response {
    let event = match decode::<DeployEvent>(&body) {
        Ok(event) => event,
        Err(status) => return status.into_response(),
    };

    let notification = RoomNotification {
        color: event.color(),
        message: event.message(),
        message_format: MessageFormat::Text,
        notify: true,
    };

    dispatch::dispatch(state.notifier.clone(), event.room_id, notification);

    StatusCode::NO_CONTENT.into_response()
}

/// Answer a Slack-style outgoing webhook synchronously.
///
/// This route returns the search result directly as `{"text": ...}` and
/// does not dispatch a room notification.
#[instrument(skip_all)]
async fn handle_slack_gif_search(State(state): State<AppState>, Form(command): Form<SlackGifCommand>) -> Response {
    let (text, trigger) = match (command.text.as_deref(), command.trigger_word.as_deref()) {
        (Some(text), Some(trigger)) if !text.is_empty() && !trigger.is_empty() => (text, trigger),
        _ => {
            error!("Slack gif search is missing `text` or `trigger_word`");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let query = text.strip_prefix(trigger).unwrap_or(text).trim();
    let message = state.gif.search_message(query).await;

    Json(json!({ "text": message })).into_response()
}
