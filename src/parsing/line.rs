//! Line classification and message-line parsing.
//!
//! WhatsApp writes two incompatible line layouts, and each has a senderless
//! variant for system events:
//!
//! - iOS: `[15/01/2024, 10:30:45] Sender: Message`
//! - Android: `15/01/2024, 10:30 - Sender: Message`
//! - iOS system: `[15/01/2024, 10:30:45] Alice added Bob`
//! - Android system: `15/01/2024, 10:30 - Alice added Bob`
//!
//! The four grammars are tried in that order and the first match wins. A
//! line that matches none of them continues the previous message.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::timestamp::resolve_timestamp;

/// One of the four line grammars, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineGrammar {
    /// `[D/M/Y, H:MM:SS[ AM]] Sender: Body`
    BracketedWithSender,
    /// `D/M/Y, H:MM[ AM] - Sender: Body`
    DashWithSender,
    /// `[D/M/Y, H:MM:SS[ AM]] Body`
    BracketedSystem,
    /// `D/M/Y, H:MM[ AM] - Body`
    DashSystem,
}

impl LineGrammar {
    /// Returns the regex pattern for this grammar.
    ///
    /// Capture groups: 1 = date, 2 = time, then sender and body for the
    /// sender grammars or just the body for the system grammars.
    pub fn pattern(self) -> &'static str {
        match self {
            // [15/01/2024, 10:30:45 PM] Sender: Message
            LineGrammar::BracketedWithSender => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}:\d{2}(?:\s(?:AM|PM|am|pm))?)\]\s(.+?):\s(.*)$"
            }
            // 15/01/2024, 10:30 PM - Sender: Message
            LineGrammar::DashWithSender => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?:\s(?:AM|PM|am|pm))?)\s-\s(.+?):\s(.*)$"
            }
            // [15/01/2024, 10:30:45] Alice created group "Trip"
            LineGrammar::BracketedSystem => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}:\d{2}(?:\s(?:AM|PM|am|pm))?)\]\s(.+)$"
            }
            // 15/01/2024, 10:30 - Alice created group "Trip"
            LineGrammar::DashSystem => {
                r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?:\s(?:AM|PM|am|pm))?)\s-\s(.+)$"
            }
        }
    }

    /// Returns `true` for the senderless grammars.
    pub fn is_system(self) -> bool {
        matches!(self, LineGrammar::BracketedSystem | LineGrammar::DashSystem)
    }

    /// Returns all grammars in priority order.
    pub fn all() -> &'static [LineGrammar] {
        &[
            LineGrammar::BracketedWithSender,
            LineGrammar::DashWithSender,
            LineGrammar::BracketedSystem,
            LineGrammar::DashSystem,
        ]
    }

    fn regex(self) -> &'static Regex {
        let index = match self {
            LineGrammar::BracketedWithSender => 0,
            LineGrammar::DashWithSender => 1,
            LineGrammar::BracketedSystem => 2,
            LineGrammar::DashSystem => 3,
        };
        &GRAMMAR_REGEXES[index]
    }

    /// Returns `true` if `line` matches this grammar.
    pub fn matches(self, line: &str) -> bool {
        self.regex().is_match(line)
    }
}

static GRAMMAR_REGEXES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    LineGrammar::all()
        .iter()
        .map(|g| Regex::new(g.pattern()).expect("valid line grammar"))
        .collect::<Vec<_>>()
        .try_into()
        .expect("one regex per grammar")
});

/// A line that starts a new message, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// The grammar that matched.
    pub grammar: LineGrammar,
    /// Sender name, empty for system lines.
    pub sender: String,
    /// Text after the header, first line only.
    pub body: String,
    /// Resolved timestamp of the header.
    pub timestamp: NaiveDateTime,
    /// `true` for the senderless grammars.
    pub is_system: bool,
}

/// Returns the first grammar `line` matches, if any.
pub fn classify_line(line: &str) -> Option<LineGrammar> {
    LineGrammar::all().iter().copied().find(|g| g.matches(line))
}

/// Returns `true` if `line` begins a new logical message.
pub fn is_new_message_line(line: &str) -> bool {
    classify_line(line).is_some()
}

/// Parses a message-start line with the first grammar that matches.
///
/// Returns `None` for continuation lines, and for header lines whose date
/// or time fields cannot be read as numbers.
///
/// ```
/// use chatview::parsing::{LineGrammar, parse_line};
///
/// let line = parse_line("12/01/2024, 09:15 - Bob: see you: soon").unwrap();
/// assert_eq!(line.grammar, LineGrammar::DashWithSender);
/// assert_eq!(line.sender, "Bob");
/// assert_eq!(line.body, "see you: soon");
/// ```
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let grammar = classify_line(line)?;
    let caps = grammar.regex().captures(line)?;

    let date = caps.get(1)?.as_str();
    let time = caps.get(2)?.as_str();
    let timestamp = resolve_timestamp(date, time)?;

    let (sender, body) = if grammar.is_system() {
        (String::new(), caps.get(3)?.as_str().to_string())
    } else {
        (
            caps.get(3)?.as_str().to_string(),
            caps.get(4)?.as_str().to_string(),
        )
    };

    Some(ParsedLine {
        grammar,
        sender,
        body,
        timestamp,
        is_system: grammar.is_system(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_bracketed_with_sender() {
        let line = "[15/01/2024, 10:30:45] Alice: Hello there";
        assert_eq!(classify_line(line), Some(LineGrammar::BracketedWithSender));

        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.sender, "Alice");
        assert_eq!(parsed.body, "Hello there");
        assert!(!parsed.is_system);
        assert_eq!(parsed.timestamp.second(), 45);
    }

    #[test]
    fn test_bracketed_with_meridiem() {
        let parsed = parse_line("[1/15/24, 10:30:45 PM] Bob: late").unwrap();
        assert_eq!(parsed.grammar, LineGrammar::BracketedWithSender);
        assert_eq!(parsed.timestamp.hour(), 22);
    }

    #[test]
    fn test_dash_with_sender() {
        let parsed = parse_line("15/01/2024, 10:30 - Alice: Hello").unwrap();
        assert_eq!(parsed.grammar, LineGrammar::DashWithSender);
        assert_eq!(parsed.sender, "Alice");
        assert_eq!(parsed.body, "Hello");
        assert_eq!(parsed.timestamp.second(), 0);
    }

    #[test]
    fn test_bracketed_system() {
        let parsed = parse_line("[15/01/2024, 10:30:45] Alice created group \"Trip\"").unwrap();
        assert_eq!(parsed.grammar, LineGrammar::BracketedSystem);
        assert!(parsed.is_system);
        assert_eq!(parsed.sender, "");
        assert_eq!(parsed.body, "Alice created group \"Trip\"");
    }

    #[test]
    fn test_dash_system() {
        let parsed = parse_line("15/01/2024, 10:30 - You were added").unwrap();
        assert_eq!(parsed.grammar, LineGrammar::DashSystem);
        assert!(parsed.is_system);
        assert_eq!(parsed.body, "You were added");
    }

    #[test]
    fn test_sender_stops_at_first_colon_space() {
        let parsed = parse_line("[1/2/24, 10:00:00] Alice: note: remember milk").unwrap();
        assert_eq!(parsed.sender, "Alice");
        assert_eq!(parsed.body, "note: remember milk");
    }

    #[test]
    fn test_empty_body_after_sender() {
        let parsed = parse_line("[1/2/24, 10:00:00] Alice: ").unwrap();
        assert_eq!(parsed.grammar, LineGrammar::BracketedWithSender);
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_bracketed_requires_seconds() {
        // Without seconds the bracketed header is not recognized at all.
        assert!(!is_new_message_line("[15/01/2024, 10:30] Alice: Hello"));
    }

    #[test]
    fn test_continuation_lines() {
        assert!(!is_new_message_line("just some text"));
        assert!(!is_new_message_line(""));
        assert!(!is_new_message_line("IMG-20240215-WA0001.jpg (file attached)"));
        assert!(parse_line("just some text").is_none());
    }

    #[test]
    fn test_classify_and_parse_agree() {
        let lines = [
            "[15/01/2024, 10:30:45] Alice: Hello",
            "15/01/2024, 10:30 - Alice: Hello",
            "[15/01/2024, 10:30:45] Bob left",
            "15/01/2024, 10:30 - Bob left",
        ];
        for (line, expected) in lines.iter().zip(LineGrammar::all()) {
            assert_eq!(classify_line(line), Some(*expected));
            assert_eq!(parse_line(line).unwrap().grammar, *expected);
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        for grammar in LineGrammar::all() {
            assert!(Regex::new(grammar.pattern()).is_ok());
        }
    }
}
