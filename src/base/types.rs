//! Wire shapes for inbound webhook events and outbound room notifications.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Application-wide error type.
pub type Err = anyhow::Error;
/// Application-wide result type.
pub type Res<T> = Result<T, Err>;
/// Result type for operations that only report success or failure.
pub type Void = Res<()>;

/// Display color of a room notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Neutral or pending condition.
    Yellow,
    /// Successful outcome.
    Green,
    /// Failed outcome.
    Red,
    /// GIF search replies; distinct from the status colors.
    Purple,
}

/// Rendering format of a room notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    /// Plain text.
    Text,
    /// Rich markup.
    Html,
}

/// Inbound room event as posted by the chat platform webhook.
///
/// Every nested field is optional at decode time; routes that need the
/// message text treat its absence as a malformed request.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomEvent {
    /// Event kind, e.g. `room_message`.
    #[serde(default)]
    pub event: Option<String>,
    /// Payload describing the message and its room.
    #[serde(default)]
    pub item: Option<RoomItem>,
    /// Identifier of the webhook that fired.
    #[serde(default)]
    pub webhook_id: Option<u64>,
}

/// Payload of a room event: the message and the room it landed in.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomItem {
    /// The posted message, if any.
    #[serde(default)]
    pub message: Option<RoomMessage>,
    /// The originating room, if any.
    #[serde(default)]
    pub room: Option<Room>,
}

/// A message inside a room event.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomMessage {
    /// The message text.
    #[serde(default)]
    pub message: Option<String>,
    /// The message author.
    #[serde(default)]
    pub from: Option<Sender>,
}

/// The author of an inbound room message.
#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// @-mention handle.
    #[serde(default)]
    pub mention_name: Option<String>,
}

/// The room an event originated from.
#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    /// Numeric room identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// Human-readable room name.
    #[serde(default)]
    pub name: Option<String>,
}

impl RoomEvent {
    /// The message text, if the event carried one.
    pub fn message_text(&self) -> Option<&str> {
        self.item.as_ref()?.message.as_ref()?.message.as_deref()
    }
}

/// Outbound room notification, serialized exactly as the platform wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNotification {
    /// Display color.
    pub color: Color,
    /// Notification text.
    pub message: String,
    /// Rendering format of the text.
    pub message_format: MessageFormat,
    /// Whether the room should raise an audible/visual alert.
    pub notify: bool,
}

/// Inbound CI deployment status push.
#[derive(Debug, Clone, Deserialize)]
pub struct DeployEvent {
    /// Environment name, e.g. `staging`.
    pub env: String,
    /// Status keyword; `beginning`, `success`, and `fail` are recognized,
    /// anything else is treated as pending.
    pub status: String,
    /// Deployment location label, e.g. the CI agent name.
    pub location: String,
    /// Room that receives the announcement.
    pub room_id: u64,
}

impl DeployEvent {
    /// Display color for the status keyword.
    ///
    /// Unknown statuses map to yellow, the same pending color as
    /// `beginning`.
    pub fn color(&self) -> Color {
        match self.status.as_str() {
            "success" => Color::Green,
            "fail" => Color::Red,
            _ => Color::Yellow,
        }
    }

    /// Notification text for the deployment.
    ///
    /// The starting case leads with the status; every other case trails
    /// with it.
    pub fn message(&self) -> String {
        if self.status == "beginning" {
            format!("{} deploy in {} on {}", self.status, self.env, self.location)
        } else {
            format!("deploy in {} on {}: {}", self.env, self.location, self.status)
        }
    }
}

/// Slack-style outgoing-webhook command, posted as a URL-encoded form.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackGifCommand {
    /// Full message text, starting with the trigger word.
    #[serde(default)]
    pub text: Option<String>,
    /// Token that invoked the webhook.
    #[serde(default)]
    pub trigger_word: Option<String>,
}

/// Process-lifetime count of trigger-phrase mentions.
///
/// Not persisted; resets on restart.
#[derive(Debug, Default)]
pub struct MentionCounter(AtomicU64);

impl MentionCounter {
    /// Increment the counter and return the post-increment value.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The current count.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy(status: &str) -> DeployEvent {
        DeployEvent {
            env: "staging".to_string(),
            status: status.to_string(),
            location: "bamboo".to_string(),
            room_id: 42,
        }
    }

    #[test]
    fn deploy_status_maps_to_color() {
        assert_eq!(deploy("success").color(), Color::Green);
        assert_eq!(deploy("fail").color(), Color::Red);
        assert_eq!(deploy("beginning").color(), Color::Yellow);
        assert_eq!(deploy("rolled back").color(), Color::Yellow);
    }

    #[test]
    fn deploy_message_leads_with_status_only_when_beginning() {
        assert_eq!(deploy("beginning").message(), "beginning deploy in staging on bamboo");
        assert_eq!(deploy("success").message(), "deploy in staging on bamboo: success");
        assert_eq!(deploy("rolled back").message(), "deploy in staging on bamboo: rolled back");
    }

    #[test]
    fn notification_serializes_to_platform_shape() {
        let notification = RoomNotification {
            color: Color::Purple,
            message: "cats: http://x/1.gif".to_string(),
            message_format: MessageFormat::Text,
            notify: true,
        };

        let value = serde_json::to_value(&notification).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "color": "purple",
                "message": "cats: http://x/1.gif",
                "message_format": "text",
                "notify": true,
            })
        );
    }

    #[test]
    fn message_text_requires_the_full_path() {
        let event: RoomEvent = serde_json::from_str(r#"{"event":"room_message"}"#).unwrap();
        assert_eq!(event.message_text(), None);

        let event: RoomEvent = serde_json::from_str(r#"{"item":{"message":{"message":"/giphy cats"}}}"#).unwrap();
        assert_eq!(event.message_text(), Some("/giphy cats"));
    }

    #[test]
    fn counter_returns_post_increment_values() {
        let counter = MentionCounter::default();

        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }
}
