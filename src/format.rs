//! Output format types and human-readable sizes.
//!
//! # Example
//!
//! ```rust
//! use chatview::format::{OutputFormat, format_file_size};
//! use std::str::FromStr;
//!
//! let format = OutputFormat::from_str("jsonl").unwrap();
//! assert_eq!(format.extension(), "jsonl");
//!
//! assert_eq!(format_file_size(350 * 1024 * 1024), "350.0 MB");
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "json-output")]
use crate::ParsedChat;
#[cfg(feature = "json-output")]
use crate::core::models::OutputConfig;
#[cfg(feature = "json-output")]
use crate::error::ChatviewError;

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// Formats a byte count as "1.2 GB" or "350.0 MB".
///
/// Anything below one gibibyte is reported in megabytes, so small files read
/// as "0.0 MB" rather than switching to kilobytes.
pub fn format_file_size(bytes: u64) -> String {
    if bytes >= GIB {
        format!("{:.1} GB", bytes as f64 / GIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Output format for a parsed chat.
///
/// - [`Json`](OutputFormat::Json) - the whole chat as one document
/// - [`Jsonl`](OutputFormat::Jsonl) - one message per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Chat document with participants, self, media handles and messages
    #[default]
    Json,

    /// JSON Lines - one message object per line (also known as NDJSON)
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// Extension used for the default output path, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Names accepted on the command line, aliases included.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson"]
    }

    /// Every format, in display order.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Content type to serve the written file with.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Picks the format matching the extension of `path`.
    ///
    /// ```rust
    /// use chatview::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("chat.ndjson"), Ok(OutputFormat::Jsonl));
    /// assert!(OutputFormat::from_path("chat.csv").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, String> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown file extension: '.{}'. Expected one of: json, jsonl",
                ext
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes a chat to a file in the specified format.
#[cfg(feature = "json-output")]
pub fn write_to_format(
    chat: &ParsedChat,
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatviewError> {
    match format {
        OutputFormat::Json => crate::core::output::write_json(chat, path, config),
        OutputFormat::Jsonl => crate::core::output::write_jsonl(chat, path, config),
    }
}

/// Converts a chat to a string in the specified format.
#[cfg(feature = "json-output")]
pub fn to_format_string(
    chat: &ParsedChat,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatviewError> {
    match format {
        OutputFormat::Json => crate::core::output::to_json(chat, config),
        OutputFormat::Jsonl => crate::core::output::to_jsonl(chat, config),
    }
}
