//! Transcript assembly: raw text to complete messages.

use std::collections::HashSet;

use crate::{Message, ParsedChat};

use super::attachment::extract_attachment;
use super::line::{is_new_message_line, parse_line};
use super::self_detect::detect_self;
use super::text::clean_line;

/// Messages and participants folded out of a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Messages in source order.
    pub messages: Vec<Message>,
    /// Distinct non-system senders in first-seen order.
    pub participants: Vec<String>,
}

/// Accumulates messages while preserving participant insertion order.
#[derive(Default)]
struct Assembler {
    messages: Vec<Message>,
    participants: Vec<String>,
    seen: HashSet<String>,
    current: Option<Message>,
}

impl Assembler {
    fn start(&mut self, next: Option<Message>) {
        self.finish_current();
        if let Some(msg) = &next {
            if !msg.is_system && self.seen.insert(msg.sender.clone()) {
                self.participants.push(msg.sender.clone());
            }
        }
        self.current = next;
    }

    fn continue_body(&mut self, line: &str) {
        if let Some(msg) = self.current.as_mut() {
            msg.body.push('\n');
            msg.body.push_str(line);
        }
    }

    fn finish_current(&mut self) {
        if let Some(mut msg) = self.current.take() {
            msg.attachment = extract_attachment(&msg.body);
            self.messages.push(msg);
        }
    }

    fn finish(mut self) -> Transcript {
        self.finish_current();
        Transcript {
            messages: self.messages,
            participants: self.participants,
        }
    }
}

/// Folds transcript text into messages.
///
/// Lines that open a message (see [`parse_line`](super::parse_line)) close the
/// previous one. Other non-empty lines are appended to the open message with
/// a `\n`; lines before the first header are dropped. Attachment markers are
/// looked up once a message is complete, so a marker on a continuation line
/// is found too.
pub fn assemble_transcript(text: &str) -> Transcript {
    let mut assembler = Assembler::default();

    for raw in text.split('\n') {
        let line = clean_line(raw);

        if let Some(parsed) = parse_line(line) {
            let msg = if parsed.is_system {
                Message::system(parsed.body, parsed.timestamp)
            } else {
                Message::new(parsed.sender, parsed.body, parsed.timestamp)
            };
            assembler.start(Some(msg));
        } else if is_new_message_line(line) {
            // Header with unreadable date fields: closes the open message
            // without starting a new one.
            assembler.start(None);
        } else if !line.is_empty() {
            assembler.continue_body(line);
        }
    }

    assembler.finish()
}

/// Parses transcript text into a [`ParsedChat`].
///
/// Never fails: text that is not a WhatsApp export yields a chat with no
/// messages, which callers should report as an unrecognized file. The
/// filename hint feeds self-detection; the media map is left empty.
///
/// ```
/// use chatview::parse_chat_text;
///
/// let text = "[13/01/2024, 17:30:00] Alice: Hi Bob\n\
///             [13/01/2024, 17:31:00] Bob: Hey!\n\
///             How are you?";
///
/// let chat = parse_chat_text(text, Some("WhatsApp Chat with Bob.txt"));
/// assert_eq!(chat.messages.len(), 2);
/// assert_eq!(chat.messages[1].body, "Hey!\nHow are you?");
/// assert_eq!(chat.participants, ["Alice", "Bob"]);
/// assert_eq!(chat.self_name, "Alice");
/// ```
pub fn parse_chat_text(text: &str, filename_hint: Option<&str>) -> ParsedChat {
    let Transcript {
        messages,
        participants,
    } = assemble_transcript(text);

    let self_name = detect_self(&messages, &participants, filename_hint);

    ParsedChat::new(messages, participants, self_name)
}
