//! Content types for extracted media.

/// Fallback for extensions outside the table.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Returns the MIME type for a filename, judged by its lowercased extension.
pub fn mime_type_for(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return DEFAULT_MIME_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "3gp" => "video/3gpp",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "opus" => "audio/opus",
        "ogg" => "audio/ogg",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "pdf" => "application/pdf",
        _ => DEFAULT_MIME_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(mime_type_for("a.JPG"), "image/jpeg");
        assert_eq!(mime_type_for("b.3gp"), "video/3gpp");
        assert_eq!(mime_type_for("c.m4a"), "audio/mp4");
        assert_eq!(mime_type_for("d.pdf"), "application/pdf");
    }

    #[test]
    fn test_unknown_types() {
        assert_eq!(mime_type_for("e.heic"), DEFAULT_MIME_TYPE);
        assert_eq!(mime_type_for("noext"), DEFAULT_MIME_TYPE);
    }
}
