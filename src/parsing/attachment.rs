//! Attachment-marker extraction.
//!
//! Exports that include media reference each file from the message body:
//!
//! - iOS: `<attached: 00000012-PHOTO-2024-02-15.jpg>`
//! - Android: `IMG-20240215-WA0001.jpg (file attached)`
//!
//! Both are usually wrapped in invisible direction marks.

use std::sync::LazyLock;

use regex::Regex;

use super::text::strip_invisible;

static ATTACHED_IOS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<attached:\s*(.+?)>$").expect("valid attachment pattern"));

static ATTACHED_ANDROID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s*\(file attached\)$").expect("valid attachment pattern")
});

/// Extracts the attachment filename referenced by a finalized message body.
///
/// The whole body is tried first. When a marker sits on its own continuation
/// line after some text, the last non-empty line is tried as well.
///
/// ```
/// use chatview::parsing::extract_attachment;
///
/// assert_eq!(
///     extract_attachment("\u{200E}<attached: 00000012-PHOTO-2024-02-15.jpg>").as_deref(),
///     Some("00000012-PHOTO-2024-02-15.jpg"),
/// );
/// assert_eq!(extract_attachment("no media here"), None);
/// ```
pub fn extract_attachment(body: &str) -> Option<String> {
    match_marker(&strip_invisible(body)).or_else(|| {
        body.lines()
            .map(strip_invisible)
            .rfind(|line| !line.is_empty())
            .and_then(|line| match_marker(&line))
    })
}

fn match_marker(text: &str) -> Option<String> {
    let name = ATTACHED_IOS
        .captures(text)
        .or_else(|| ATTACHED_ANDROID.captures(text))?
        .get(1)?
        .as_str();

    let name = strip_invisible(name);
    (!name.is_empty()).then_some(name)
}
