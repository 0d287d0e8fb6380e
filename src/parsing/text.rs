//! Invisible-character handling for transcript lines.
//!
//! WhatsApp sprinkles directional marks and zero-width characters around
//! names, attachment markers and line starts. None of them are visible, but
//! all of them break anchored pattern matching.

/// Returns `true` for the formatting characters WhatsApp inserts invisibly.
///
/// Covers LRM/RLM, zero-width space/non-joiner/joiner, the embedding and
/// override controls U+202A..=U+202E, the BOM and the soft hyphen.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200E}'
            | '\u{200F}'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{202A}'..='\u{202E}'
            | '\u{FEFF}'
            | '\u{00AD}'
    )
}

/// Removes every invisible character and trims surrounding whitespace.
pub fn strip_invisible(text: &str) -> String {
    let cleaned: String = text.chars().filter(|&c| !is_invisible(c)).collect();
    cleaned.trim().to_string()
}

/// Prepares one raw transcript line for classification.
///
/// Strips a leading BOM, a trailing carriage return and the run of invisible
/// characters at the start of the line. Whitespace is left alone, so an
/// indented continuation line keeps its indentation.
pub fn clean_line(line: &str) -> &str {
    let line = line.strip_prefix('\u{FEFF}').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim_start_matches(is_invisible)
}
