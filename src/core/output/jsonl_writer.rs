//! JSON Lines (JSONL) output writer.
//!
//! One message per line, which suits line-oriented tools (`grep`, `jq -c`)
//! and appending several chats into one corpus.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::record::records;
use crate::ParsedChat;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes the chat's messages to a JSONL file.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","body":"Hello","timestamp":"2024-01-15T10:30:00"}
/// {"sender":"Bob","body":"Hi","timestamp":"2024-01-15T10:31:00"}
/// ```
pub fn write_jsonl(chat: &ParsedChat, output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records(chat, config) {
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts the chat's messages to a JSONL string.
pub fn to_jsonl(chat: &ParsedChat, config: &OutputConfig) -> Result<String> {
    let mut output = String::new();
    for record in records(chat, config) {
        output.push_str(&serde_json::to_string(&record)?);
        output.push('\n');
    }
    Ok(output)
}
