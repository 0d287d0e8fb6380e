//! Filter messages by date range and sender.
//!
//! [`FilterConfig`] holds the criteria a viewer picked and [`apply_filters`]
//! narrows a message list down to them.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | First day shown |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Last day shown |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//!
//! # Date ranges
//!
//! Ranges cover whole local days on both ends. A range with a start but no
//! end covers that single day, which is what picking one day in a calendar
//! means. A range with only an end covers everything up to that day.
//!
//! ```
//! use chatview::core::filter::{FilterConfig, apply_filters};
//! use chatview::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatview::Result<()> {
//! let at = |d: u32, h: u32| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new("Alice", "Monday", at(3, 9)),
//!     Message::new("Bob", "Tuesday late", at(4, 23)),
//!     Message::new("Alice", "Wednesday", at(5, 8)),
//! ];
//!
//! let one_day = FilterConfig::new().with_date_from("2024-06-04")?;
//! let filtered = apply_filters(messages.clone(), &one_day);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "Tuesday late");
//!
//! let range = FilterConfig::new()
//!     .with_date_from("2024-06-04")?
//!     .with_date_to("2024-06-05")?;
//! assert_eq!(apply_filters(messages, &range).len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - System messages have no sender and never match a sender filter
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime};

use crate::Message;
use crate::error::ChatviewError;

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// First day of the range, inclusive.
    pub date_from: Option<NaiveDate>,

    /// Last day of the range, inclusive.
    pub date_to: Option<NaiveDate>,

    /// Keep only this sender's messages.
    pub sender: Option<String>,
}

impl FilterConfig {
    /// An empty filter.
    ///
    /// Every message passes until a criterion is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first day of the range from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatviewError> {
        self.date_from = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the last day of the range from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`ChatviewError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatviewError> {
        self.date_to = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets both ends of the range from parsed dates.
    #[must_use]
    pub fn with_range(mut self, from: NaiveDate, to: Option<NaiveDate>) -> Self {
        self.date_from = Some(from);
        self.date_to = to;
        self
    }

    /// Restricts to one sender.
    ///
    /// Matching is case-insensitive for ASCII characters.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Returns `true` when at least one criterion is set.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.sender.is_some()
    }

    /// Returns `true` if a date filter is active.
    pub fn has_date_filter(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Returns `true` if `ts` falls inside the date range.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let day = ts.date();
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => from <= day && day <= to,
            (Some(from), None) => day == from,
            (None, Some(to)) => day <= to,
            (None, None) => true,
        }
    }

    fn matches(&self, msg: &Message) -> bool {
        if let Some(ref sender) = self.sender {
            if !msg.sender.eq_ignore_ascii_case(sender) {
                return false;
            }
        }
        self.contains(msg.timestamp)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatviewError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatviewError::invalid_date(date_str))
}

/// Keeps the messages that satisfy every criterion of `config`, in order.
///
/// Returns a new vector containing only messages that match all active
/// filters, in their original order.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}
