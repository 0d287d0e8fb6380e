//! Detection of the participant who exported the chat.
//!
//! Transcripts never say which participant owns the device. The answer is
//! recovered with an ordered list of [`SelfStrategy`] values; the first one
//! that reaches a decision wins. The result is a best guess and viewers are
//! expected to let the user swap it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::Message;

static EXPORT_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:whatsapp chat|chat export) with (.+)\.txt$")
        .expect("valid export filename pattern")
});

/// Inputs shared by all strategies.
#[derive(Debug, Clone, Copy)]
pub struct DetectionContext<'a> {
    /// Assembled messages, system messages included.
    pub messages: &'a [Message],
    /// Distinct non-system senders in first-seen order.
    pub participants: &'a [String],
    /// Name of the exported file, if known.
    pub filename: Option<&'a str>,
}

/// One self-detection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfStrategy {
    /// The export filename names the other party.
    FilenameHint,
    /// The participant with the most messages.
    MostFrequentSender,
}

impl SelfStrategy {
    /// Returns all strategies in priority order.
    pub fn all() -> &'static [SelfStrategy] {
        &[SelfStrategy::FilenameHint, SelfStrategy::MostFrequentSender]
    }

    /// Runs this strategy, returning `None` when it cannot decide.
    pub fn decide(self, ctx: &DetectionContext<'_>) -> Option<String> {
        match self {
            SelfStrategy::FilenameHint => decide_from_filename(ctx),
            SelfStrategy::MostFrequentSender => {
                most_frequent_sender(ctx.messages, ctx.participants)
            }
        }
    }
}

/// Picks the participant representing the device owner.
///
/// Returns an empty string when there are no participants.
///
/// ```
/// use chatview::parsing::detect_self;
///
/// let participants = vec!["Alice".to_string(), "Bob".to_string()];
/// let me = detect_self(&[], &participants, Some("WhatsApp Chat with Bob.txt"));
/// assert_eq!(me, "Alice");
/// ```
pub fn detect_self(messages: &[Message], participants: &[String], filename: Option<&str>) -> String {
    if participants.is_empty() {
        return String::new();
    }

    let ctx = DetectionContext {
        messages,
        participants,
        filename,
    };

    SelfStrategy::all()
        .iter()
        .find_map(|strategy| strategy.decide(&ctx))
        .unwrap_or_default()
}

/// Extracts the contact name from `WhatsApp Chat with <Name>.txt`.
pub fn other_party_from_filename(filename: &str) -> Option<String> {
    let caps = EXPORT_FILENAME.captures(filename)?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn decide_from_filename(ctx: &DetectionContext<'_>) -> Option<String> {
    let other = other_party_from_filename(ctx.filename?)?.to_lowercase();
    let is_other = |p: &String| p.to_lowercase() == other;

    if ctx.participants.len() == 2 {
        if let Some(me) = ctx.participants.iter().find(|p| !is_other(*p)) {
            return Some(me.clone());
        }
    }

    let remaining: Vec<String> = ctx
        .participants
        .iter()
        .filter(|p| !is_other(*p))
        .cloned()
        .collect();

    if remaining.is_empty() || remaining.len() == ctx.participants.len() {
        return None;
    }

    most_frequent_sender(ctx.messages, &remaining)
}

/// Returns the candidate with the most non-system messages.
///
/// Ties go to the candidate listed first. `None` only for an empty list.
pub fn most_frequent_sender(messages: &[Message], candidates: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> =
        candidates.iter().map(|c| (c.as_str(), 0)).collect();

    for msg in messages.iter().filter(|m| !m.is_system) {
        if let Some(count) = counts.get_mut(msg.sender.as_str()) {
            *count += 1;
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for candidate in candidates {
        let count = counts.get(candidate.as_str()).copied().unwrap_or(0);
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((candidate, count));
        }
    }

    best.map(|(name, _)| name.clone())
}
