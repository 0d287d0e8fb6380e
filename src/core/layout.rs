//! Per-row decisions a message list needs before drawing.
//!
//! Given messages in display order, [`layout_rows`] says where a day
//! separator goes and which bubbles repeat the sender name. Rendering itself
//! is up to the viewer.

use chrono::{Days, NaiveDate};

use crate::Message;

/// Layout facts for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRow {
    /// Position in the input slice.
    pub index: usize,
    /// Day to announce above this message, when it starts a new day.
    pub date_separator: Option<NaiveDate>,
    /// Whether the bubble repeats the sender name.
    pub show_sender: bool,
    /// Whether the message is drawn as a centered notice.
    pub system_like: bool,
}

/// Computes separators and sender labels for a message sequence.
///
/// The sender is shown on a regular message when it opens the list, follows
/// another sender or a notice, or starts a new day. Notices never show one.
pub fn layout_rows(messages: &[Message]) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(messages.len());
    let mut prev: Option<(&Message, bool)> = None;

    for (index, msg) in messages.iter().enumerate() {
        let system_like = msg.is_system_like();
        let day = msg.timestamp.date();

        let new_day = prev.is_none_or(|(p, _)| p.timestamp.date() != day);
        let show_sender = !system_like
            && match prev {
                None => true,
                Some((p, prev_system_like)) => p.sender != msg.sender || prev_system_like || new_day,
            };

        rows.push(DisplayRow {
            index,
            date_separator: new_day.then_some(day),
            show_sender,
            system_like,
        });
        prev = Some((msg, system_like));
    }

    rows
}

/// Label for a day separator, relative to `today`.
///
/// ```
/// use chatview::core::layout::date_label;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(date_label(today, today), "Today");
/// assert_eq!(date_label(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(), today), "Yesterday");
/// assert_eq!(
///     date_label(NaiveDate::from_ymd_opt(2024, 1, 13).unwrap(), today),
///     "Saturday, January 13, 2024"
/// );
/// ```
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.checked_sub_days(Days::new(1)) == Some(date) {
        return "Yesterday".to_string();
    }
    date.format("%A, %B %-d, %Y").to_string()
}
