//! Serialized shape of one message, shared by the JSON writers.

use serde::Serialize;

use crate::core::models::OutputConfig;
use crate::{Message, ParsedChat};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One message as written to disk.
///
/// Only includes optional fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct MessageRecord<'a> {
    sender: &'a str,
    body: &'a str,
    timestamp: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_self: Option<bool>,
}

impl<'a> MessageRecord<'a> {
    fn new(msg: &'a Message, chat: &'a ParsedChat, config: &OutputConfig, system: bool) -> Self {
        Self {
            sender: &msg.sender,
            body: &msg.body,
            timestamp: msg.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            system,
            attachment: msg.attachment.as_deref(),
            media: if config.include_media {
                chat.media_for(msg).map(|h| h.as_str())
            } else {
                None
            },
            is_self: if config.include_self && !system {
                Some(chat.is_from_self(msg, config.swapped))
            } else {
                None
            },
        }
    }
}

/// Records for every message the config keeps, in order.
pub(super) fn records<'a>(chat: &'a ParsedChat, config: &OutputConfig) -> Vec<MessageRecord<'a>> {
    chat.messages
        .iter()
        .filter_map(|msg| {
            let system = msg.is_system_like();
            if config.skip_system && system {
                return None;
            }
            Some(MessageRecord::new(msg, chat, config, system))
        })
        .collect()
}
