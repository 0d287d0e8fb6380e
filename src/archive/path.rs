//! Entry-name checks for untrusted archives.

/// Returns `false` for entry names that could escape an extraction root.
///
/// Backslashes are treated as separators. Absolute paths, Windows drive
/// letters and any `..` segment at the start, middle or end are rejected.
///
/// ```
/// use chatview::archive::is_safe_zip_path;
///
/// assert!(is_safe_zip_path("WhatsApp Chat/IMG-0001.jpg"));
/// assert!(!is_safe_zip_path("../../etc/passwd"));
/// assert!(!is_safe_zip_path("media\\..\\..\\evil.jpg"));
/// ```
pub fn is_safe_zip_path(name: &str) -> bool {
    let normalized = name.replace('\\', "/");

    if normalized.starts_with('/') || normalized.starts_with("..") {
        return false;
    }
    if normalized.contains("/../") || normalized.ends_with("/..") {
        return false;
    }

    let bytes = normalized.as_bytes();
    !(bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

/// Returns `true` for resource-fork entries macOS adds to archives.
pub fn is_macos_metadata(name: &str) -> bool {
    name.starts_with("__MACOSX")
}

/// Reduces an entry name to a flat filename safe to use as a map key.
///
/// Keeps the part after the last `/` or `\`, drops leading dots and removes
/// any remaining `..`. The result may be empty.
///
/// ```
/// use chatview::archive::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Chat/IMG-0001.jpg"), "IMG-0001.jpg");
/// assert_eq!(sanitize_filename("..hidden.png"), "hidden.png");
/// assert_eq!(sanitize_filename("dir/.."), "");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let basename = name.rsplit('/').next().unwrap_or(name);
    let basename = basename.rsplit('\\').next().unwrap_or(basename);
    basename.trim_start_matches('.').replace("..", "")
}
