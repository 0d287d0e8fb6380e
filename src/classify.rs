//! Text predicates for messages that should be shown as notices.
//!
//! The line grammars only flag senderless lines as system messages. Plenty of
//! events are written with a sender prefix anyway ("Alice: ‎This message was
//! deleted"), so viewers run these substring checks as a second net.

use crate::parsing::text::strip_invisible;

/// Phrases that mark a message as a notice rather than conversation.
const SYSTEM_PATTERNS: &[&str] = &[
    "blocked this contact",
    "unblocked this contact",
    "blocked this person",
    "unblocked this person",
    "changed their phone number",
    "changed the subject",
    "changed this group",
    "changed the group",
    "was added",
    "was removed",
    "left",
    "added you",
    "removed you",
    "message was deleted",
    "this message was deleted",
    "you deleted this message",
    "waiting for this message",
    "security code changed",
    "disappearing messages",
    "turned on disappearing",
    "turned off disappearing",
    "changed the disappearing",
    "created group",
    "created this group",
    "joined using this group",
    "admin",
];

/// Returns `true` for the end-to-end encryption banner.
///
/// ```
/// use chatview::is_encryption_notice;
///
/// assert!(is_encryption_notice(
///     "\u{200E}Messages and calls are end-to-end encrypted. No one outside of this chat can read them."
/// ));
/// assert!(!is_encryption_notice("see you at 5"));
/// ```
pub fn is_encryption_notice(text: &str) -> bool {
    strip_invisible(text)
        .to_lowercase()
        .contains("end-to-end encrypted")
}

/// Returns `true` if the text contains one of the known notice phrases.
///
/// This is a plain case-insensitive substring test, so ordinary messages
/// that happen to contain "left" or "admin" match as well.
pub fn is_system_like_message(text: &str) -> bool {
    let clean = strip_invisible(text).to_lowercase();
    SYSTEM_PATTERNS.iter().any(|pattern| clean.contains(pattern))
}
