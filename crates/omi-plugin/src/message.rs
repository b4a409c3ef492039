//! Inbound chat events and their message segments.

use serde::{Deserialize, Serialize};

/// One piece of a chat message, as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// A mention of another user.
    Mention {
        /// The mentioned user's id.
        target_id: String,
        /// The mentioned user's name, when the host knows it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    /// An embedded image.
    Image {
        /// Where the image lives.
        url: String,
    },
    /// Any segment kind this plugin does not interpret.
    Other {
        /// The host's name for the segment kind.
        kind: String,
    },
}

impl Segment {
    /// A text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// A mention segment without a known display name.
    pub fn mention(target_id: impl Into<String>) -> Self {
        Self::Mention {
            target_id: target_id.into(),
            display_name: None,
        }
    }
}

/// A chat message addressed to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Id of the user who sent the message.
    pub sender_id: String,
    /// Display name of the sender.
    pub sender_name: String,
    /// The raw message text, command included.
    pub message: String,
    /// Structured segments of the message.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl ChatEvent {
    /// An event whose only segment is the message text.
    pub fn new(
        sender_id: impl Into<String>,
        sender_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            sender_id: sender_id.into(),
            sender_name: sender_name.into(),
            segments: vec![Segment::text(message.clone())],
            message,
        }
    }

    /// Append a segment.
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// The first mention in the message, if any.
    pub fn first_mention(&self) -> Option<(&str, Option<&str>)> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Mention {
                target_id,
                display_name,
            } => Some((target_id.as_str(), display_name.as_deref())),
            _ => None,
        })
    }
}

/// The user a command acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The user's id.
    pub user_id: String,
    /// Name to show for the user.
    pub display_name: String,
}

/// The first mentioned user, falling back to the sender.
///
/// A mention without a host-supplied name is shown as `用户(<id>)`.
pub fn resolve_target(event: &ChatEvent) -> Target {
    match event.first_mention() {
        Some((id, name)) => Target {
            user_id: id.to_string(),
            display_name: name
                .map(str::to_string)
                .unwrap_or_else(|| format!("用户({id})")),
        },
        None => Target {
            user_id: event.sender_id.clone(),
            display_name: event.sender_name.clone(),
        },
    }
}
