//! Summary statistics for a parsed chat.

use chrono::NaiveDateTime;

use crate::ParsedChat;

/// Counts describing a parsed chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatStats {
    pub total_messages: usize,
    /// Messages drawn as bubbles rather than notices.
    pub conversational: usize,
    pub system_like: usize,
    /// Messages whose body references an attachment.
    pub with_attachments: usize,
    /// Attachments actually extracted from the archive.
    pub media_count: usize,
    pub participants: usize,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
}

impl ChatStats {
    pub fn from_chat(chat: &ParsedChat) -> Self {
        let system_like = chat.messages.iter().filter(|m| m.is_system_like()).count();
        let (first_message, last_message) = chat.date_span().unzip();

        Self {
            total_messages: chat.messages.len(),
            conversational: chat.messages.len() - system_like,
            system_like,
            with_attachments: chat
                .messages
                .iter()
                .filter(|m| m.attachment.is_some())
                .count(),
            media_count: chat.media.len(),
            participants: chat.participants.len(),
            first_message,
            last_message,
        }
    }

    /// Referenced attachments with no extracted file behind them.
    ///
    /// Plain-text exports always report every reference as missing.
    pub fn missing_media(&self) -> usize {
        self.with_attachments.saturating_sub(self.media_count)
    }

    /// Share of messages that are notices, in percent.
    pub fn system_ratio(&self) -> f64 {
        if self.total_messages == 0 {
            return 0.0;
        }
        self.system_like as f64 / self.total_messages as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::Message;
    use crate::media::MediaHandle;

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_stats_from_chat() {
        let mut media = BTreeMap::new();
        media.insert("a.jpg".to_string(), MediaHandle::new("mem://0"));

        let chat = ParsedChat::new(
            vec![
                Message::system("Alice created group \"Trip\"", ts(8)),
                Message::new("Alice", "<attached: a.jpg>", ts(9)).with_attachment("a.jpg"),
                Message::new("Bob", "<attached: b.jpg>", ts(10)).with_attachment("b.jpg"),
                Message::new("Bob", "nice", ts(11)),
            ],
            vec!["Alice".to_string(), "Bob".to_string()],
            "Alice",
        )
        .with_media(media);

        let stats = ChatStats::from_chat(&chat);
        assert_eq!(stats.total_messages, 4);
        assert_eq!(stats.system_like, 1);
        assert_eq!(stats.conversational, 3);
        assert_eq!(stats.with_attachments, 2);
        assert_eq!(stats.media_count, 1);
        assert_eq!(stats.missing_media(), 1);
        assert_eq!(stats.first_message, Some(ts(8)));
        assert_eq!(stats.last_message, Some(ts(11)));
        assert!((stats.system_ratio() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_chat() {
        let stats = ChatStats::from_chat(&ParsedChat::default());
        assert_eq!(stats, ChatStats::default());
        assert_eq!(stats.system_ratio(), 0.0);
    }
}
