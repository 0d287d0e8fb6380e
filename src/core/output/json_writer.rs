//! JSON output writer.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::record::{MessageRecord, records};
use crate::ParsedChat;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Whole-chat document.
#[derive(Serialize)]
struct JsonChat<'a> {
    title: String,
    #[serde(rename = "self")]
    self_name: &'a str,
    participants: &'a [String],
    messages: Vec<MessageRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<BTreeMap<&'a str, &'a str>>,
}

/// Writes the chat to a JSON file.
///
/// # Format
/// ```json
/// {
///   "title": "Alice & Bob",
///   "self": "Alice",
///   "participants": ["Alice", "Bob"],
///   "messages": [
///     {"sender": "Alice", "body": "Hello", "timestamp": "2024-01-15T10:30:00"}
///   ]
/// }
/// ```
pub fn write_json(chat: &ParsedChat, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(chat, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the chat to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(chat: &ParsedChat, config: &OutputConfig) -> Result<String> {
    let doc = JsonChat {
        title: chat.title(),
        self_name: &chat.self_name,
        participants: &chat.participants,
        messages: records(chat, config),
        media: config.include_media.then(|| {
            chat.media
                .iter()
                .map(|(name, handle)| (name.as_str(), handle.as_str()))
                .collect()
        }),
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    use crate::Message;
    use crate::media::MediaHandle;

    fn sample() -> ParsedChat {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let mut media = BTreeMap::new();
        media.insert("a.jpg".to_string(), MediaHandle::new("mem://0"));
        ParsedChat::new(
            vec![
                Message::system("Messages and calls are end-to-end encrypted.", ts),
                Message::new("Alice", "Hello", ts),
                Message::new("Bob", "<attached: a.jpg>", ts).with_attachment("a.jpg"),
            ],
            vec!["Alice".to_string(), "Bob".to_string()],
            "Alice",
        )
        .with_media(media)
    }

    #[test]
    fn test_to_json_basic() {
        let json = to_json(&sample(), &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""title": "Alice & Bob""#));
        assert!(json.contains(r#""self": "Alice""#));
        assert!(json.contains(r#""body": "Hello""#));
        assert!(json.contains(r#""timestamp": "2024-06-15T12:30:00""#));
        assert!(json.contains(r#""attachment": "a.jpg""#));
        assert!(!json.contains("mem://0"));
        assert!(!json.contains("is_self"));
    }

    #[test]
    fn test_to_json_with_options() {
        let config = OutputConfig::new().with_media().with_self_flag().without_system();
        let json = to_json(&sample(), &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["is_self"], true);
        assert_eq!(messages[1]["is_self"], false);
        assert_eq!(messages[1]["media"], "mem://0");
        assert_eq!(value["media"]["a.jpg"], "mem://0");
    }

    #[test]
    fn test_write_json_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&sample(), path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["messages"].as_array().unwrap().len(), 3);
        assert_eq!(value["messages"][0]["system"], true);
    }
}
