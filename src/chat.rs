//! The parsed conversation handed to viewers.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::media::MediaHandle;

/// A fully parsed chat export.
///
/// `media` maps sanitized attachment filenames to registry handles. The
/// blobs themselves live in the [`MediaRegistry`](crate::media::MediaRegistry)
/// that produced the handles and must be released through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChat {
    /// Messages in transcript order.
    pub messages: Vec<Message>,

    /// Distinct non-system senders in first-seen order.
    pub participants: Vec<String>,

    /// Best guess at the participant who exported the chat. Empty when the
    /// chat has no participants.
    #[serde(rename = "self")]
    pub self_name: String,

    /// Attachment filename to media handle.
    #[serde(default)]
    pub media: BTreeMap<String, MediaHandle>,
}

impl ParsedChat {
    /// Creates a chat without media.
    pub fn new(
        messages: Vec<Message>,
        participants: Vec<String>,
        self_name: impl Into<String>,
    ) -> Self {
        Self {
            messages,
            participants,
            self_name: self_name.into(),
            media: BTreeMap::new(),
        }
    }

    /// Builder method to attach a media map.
    #[must_use]
    pub fn with_media(mut self, media: BTreeMap<String, MediaHandle>) -> Self {
        self.media = media;
        self
    }

    /// Overrides the detected self participant.
    #[must_use]
    pub fn with_self(mut self, name: impl Into<String>) -> Self {
        self.self_name = name.into();
        self
    }

    /// Returns `true` if no message was recognized.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Counts messages that are conversation rather than notices.
    pub fn message_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_system_like()).count()
    }

    /// Earliest and latest message timestamps.
    pub fn date_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.messages.iter().map(|m| m.timestamp).min()?;
        let last = self.messages.iter().map(|m| m.timestamp).max()?;
        Some((first, last))
    }

    /// Returns `true` for chats with more than two participants.
    pub fn is_group(&self) -> bool {
        self.participants.len() > 2
    }

    /// Header title for the chat.
    ///
    /// Groups are labelled by size, one-on-one chats by their participants.
    ///
    /// ```
    /// use chatview::ParsedChat;
    ///
    /// let chat = ParsedChat::new(vec![], vec!["Alice".into(), "Bob".into()], "Alice");
    /// assert_eq!(chat.title(), "Alice & Bob");
    ///
    /// let group = ParsedChat::new(vec![], vec!["A".into(), "B".into(), "C".into()], "A");
    /// assert_eq!(group.title(), "Group Chat (3)");
    /// ```
    pub fn title(&self) -> String {
        if self.is_group() {
            format!("Group Chat ({})", self.participants.len())
        } else {
            self.participants
                .iter()
                .filter(|p| !p.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" & ")
        }
    }

    /// Decides whether `msg` is drawn on the self side.
    ///
    /// With `swapped` set every other sender is treated as self instead, for
    /// when self-detection guessed wrong.
    pub fn is_from_self(&self, msg: &Message, swapped: bool) -> bool {
        let matches = msg.sender == self.self_name;
        if swapped { !matches } else { matches }
    }

    /// Attachment handle for `msg`, if the file was extracted.
    pub fn media_for(&self, msg: &Message) -> Option<&MediaHandle> {
        self.media.get(msg.attachment.as_deref()?)
    }
}
