//! The message type produced by the transcript parser.
//!
//! A [`Message`] is one logical entry of a chat export: a sender line plus any
//! continuation lines that followed it, with the timestamp already resolved.
//!
//! # Examples
//!
//! ```
//! use chatview::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 13)
//!     .unwrap()
//!     .and_hms_opt(17, 30, 0)
//!     .unwrap();
//!
//! let msg = Message::new("Alice", "Hello, world!", ts);
//! assert_eq!(msg.sender(), "Alice");
//! assert!(!msg.is_system());
//!
//! let notice = Message::system("Alice created group \"Trip\"", ts);
//! assert!(notice.is_system());
//! assert_eq!(notice.sender(), "");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatview::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let msg = Message::new("Bob", "IMG-0001.jpg (file attached)", ts)
//!     .with_attachment("IMG-0001.jpg");
//!
//! let json = serde_json::to_string(&msg)?;
//! assert!(json.contains("\"attachment\":\"IMG-0001.jpg\""));
//!
//! let parsed: Message = serde_json::from_str(&json)?;
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::{is_encryption_notice, is_system_like_message};

/// One message of a chat transcript.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `sender` | `String` | Display name of the author, empty for system messages |
/// | `body` | `String` | Text, with `\n` between continuation lines |
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time; exports carry no timezone |
/// | `is_system` | `bool` | Set for senderless lines |
/// | `attachment` | `Option<String>` | Media filename referenced by the body |
///
/// The body is stored exactly as exported. When an attachment is detected the
/// marker text (`<attached: ...>` or `... (file attached)`) stays in the body
/// and the filename is additionally exposed through [`attachment`](Self::attachment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the message author. Empty for system messages.
    pub sender: String,

    /// Text of the message, possibly spanning several lines.
    pub body: String,

    /// When the message was sent, in the exporting device's local time.
    pub timestamp: NaiveDateTime,

    /// `true` when the line had no sender (membership changes, notices).
    #[serde(default)]
    pub is_system: bool,

    /// Filename of an attached media file, as referenced in the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment: Option<String>,
}

impl Message {
    /// Creates a regular message from a participant.
    pub fn new(sender: impl Into<String>, body: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            timestamp,
            is_system: false,
            attachment: None,
        }
    }

    /// Creates a senderless system message.
    pub fn system(body: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            sender: String::new(),
            body: body.into(),
            timestamp,
            is_system: true,
            attachment: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the attachment filename.
    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachment = Some(name.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns `true` if the line carried no sender.
    pub fn is_system(&self) -> bool {
        self.is_system
    }

    /// Returns the attachment filename, if any.
    pub fn attachment(&self) -> Option<&str> {
        self.attachment.as_deref()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if this message should be shown as a centered notice
    /// rather than a chat bubble.
    ///
    /// The grammar-level system flag misses events that WhatsApp writes with a
    /// sender-like prefix, so the body is also checked against the known
    /// system phrases.
    ///
    /// ```
    /// use chatview::Message;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let msg = Message::new("Alice", "This message was deleted", ts);
    /// assert!(!msg.is_system());
    /// assert!(msg.is_system_like());
    /// ```
    pub fn is_system_like(&self) -> bool {
        self.is_system || is_encryption_notice(&self.body) || is_system_like_message(&self.body)
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
