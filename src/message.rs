//! Message context and outgoing payload types.
//!
//! This module defines the platform-facing surface of the dispatcher: the
//! [`Message`] context handed to every dispatch, the [`Member`] identity it
//! carries, and the [`Outgoing`] payloads the bot sends back through a
//! [`Notifier`].
//!
//! The dispatcher itself is transport-agnostic. Whatever connects it to a chat
//! platform (a gateway client, a console loop, a test harness) implements
//! [`Notifier`] and builds [`Message`] values; nothing in this crate performs
//! network I/O.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A chat user, either the author of a message or a resolved mention.
///
/// # Examples
///
/// ```
/// # use herald::message::Member;
/// let member = Member {
///     id: "1042".to_string(),
///     username: "alice".to_string(),
///     avatar_url: Some("https://cdn.example.com/alice.png".to_string()),
/// };
/// assert_eq!(member.username, "alice");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Platform identifier of the user
    pub id: String,
    /// Display name of the user
    pub username: String,
    /// URL of the user's avatar image, if any
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Send capability of a channel.
///
/// This trait abstracts the outbound half of the chat platform so the
/// dispatcher can emit notices without knowing the transport. Sends are
/// fire-and-forget: implementations swallow delivery failures, the dispatcher
/// never observes them.
pub trait Notifier: Send + Sync {
    /// Delivers a payload to the channel.
    fn send(&self, payload: Outgoing) -> BoxFuture<'static, ()>;
}

/// Context of one incoming message, passed through an entire dispatch.
///
/// A `Message` carries the author identity, the guild and channel the message
/// was posted in, and the send capability used to answer. It is cheap to clone;
/// the channel handle is shared behind an [`Arc`].
///
/// Commands that declare the reserved `message` parameter type receive a clone
/// of this value as their first argument.
#[derive(Clone)]
pub struct Message {
    /// Author of the message
    pub author: Member,
    /// Guild (server) the message was posted in. Direct messages have none and
    /// are ignored by the dispatcher.
    pub guild_id: Option<String>,
    /// Channel the message was posted in
    pub channel_id: String,
    channel: Arc<dyn Notifier>,
}

impl Message {
    /// Creates a new message context.
    ///
    /// # Arguments
    ///
    /// * `author` - The user who sent the message.
    /// * `guild_id` - The guild the message belongs to, if any.
    /// * `channel_id` - The channel the message was posted in.
    /// * `channel` - The send capability used to answer in that channel.
    pub fn new(
        author: Member,
        guild_id: Option<String>,
        channel_id: &str,
        channel: Arc<dyn Notifier>,
    ) -> Self {
        Message {
            author,
            guild_id,
            channel_id: channel_id.to_string(),
            channel,
        }
    }

    /// Sends a payload back to the channel the message came from.
    ///
    /// Fire-and-forget: delivery failures are handled by the [`Notifier`]
    /// implementation and never surface here.
    pub async fn send(&self, payload: Outgoing) {
        self.channel.send(payload).await;
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("author", &self.author)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .finish_non_exhaustive()
    }
}

/// Footer line of a [`Notice`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer text, e.g. `Requested by alice`
    pub text: String,
    /// Small icon shown next to the footer text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A structured, user-facing notification.
///
/// Notices are the rich responses the dispatcher and the built-in commands
/// send: permission denials, parsing errors, command output. The front end
/// renders them however its platform allows (embed, markdown, plain text).
///
/// Both `title` and `description` are optional; execution reports may carry
/// either one alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Short title line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent color, `0xRRGGBB`
    pub color: u32,
    /// Optional image to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional footer line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

/// A payload on its way out to the channel.
#[derive(Clone, Debug, PartialEq)]
pub enum Outgoing {
    /// A structured notice built by this crate
    Notice(Notice),
    /// An opaque payload, e.g. a canned answer from the fallback store,
    /// forwarded without interpretation
    Raw(serde_json::Value),
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingChannel, test_message};
    use super::*;

    #[tokio::test]
    async fn test_send_records_payload() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());

        message
            .send(Outgoing::Raw(serde_json::json!({"answer": 42})))
            .await;

        let sent = channel.payloads();
        assert_eq!(sent.len(), 1);
        assert!(matches!(sent[0], Outgoing::Raw(_)));
    }

    #[test]
    fn test_message_is_cloneable() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel);
        let clone = message.clone();
        assert_eq!(clone.author, message.author);
        assert_eq!(clone.guild_id, message.guild_id);
        assert_eq!(clone.channel_id, message.channel_id);
    }

    #[test]
    fn test_notice_serialization_skips_empty_fields() {
        let notice = Notice {
            title: Some("Pong!".to_string()),
            description: None,
            color: 0x7289DA,
            image_url: None,
            footer: None,
        };

        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["title"], "Pong!");
        assert!(json.get("description").is_none());
        assert!(json.get("image_url").is_none());
        assert!(json.get("footer").is_none());
    }

    #[test]
    fn test_notice_round_trip() {
        let notice = Notice {
            title: Some("No Permission!".to_string()),
            description: Some("missing rights".to_string()),
            color: 0x112233,
            image_url: Some("https://cdn.example.com/a.png".to_string()),
            footer: Some(Footer {
                text: "Executed by alice".to_string(),
                icon_url: None,
            }),
        };

        let json = serde_json::to_string(&notice).unwrap();
        let back: Notice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notice);
    }

    #[test]
    fn test_debug_omits_channel() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel);
        let debug = format!("{message:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("RecordingChannel"));
    }
}
