//! Structured log events emitted during ingestion.
//!
//! Every event carries an `operation` field so a subscriber can filter one
//! stage of the pipeline. Installing a subscriber is left to the binary.

use std::fmt::Display;

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOperation {
    ArchiveScan,
    MediaExtraction,
    TranscriptParsing,
    MediaRelease,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::ArchiveScan => "archive_scan",
            LogOperation::MediaExtraction => "media_extraction",
            LogOperation::TranscriptParsing => "transcript_parsing",
            LogOperation::MediaRelease => "media_release",
        }
    }
}

/// Log the outcome of the archive directory scan
pub fn log_archive_scanned(entries: usize, transcript: &str, media: usize) {
    tracing::debug!(
        operation = LogOperation::ArchiveScan.as_str(),
        entry_count = entries,
        transcript = transcript,
        media_count = media,
        "Scanned archive directory"
    );
}

/// Log an archive entry that was ignored
pub fn log_entry_skipped(name: &str, reason: &str) {
    tracing::debug!(
        operation = LogOperation::ArchiveScan.as_str(),
        entry = name,
        reason = reason,
        "Skipped archive entry"
    );
}

/// Log a media entry that could not be decompressed or stored
pub fn log_media_unreadable(name: &str, error: &dyn Display) {
    tracing::warn!(
        operation = LogOperation::MediaExtraction.as_str(),
        entry = name,
        error = %error,
        "Skipped unreadable media entry"
    );
}

/// Log an extraction aborted by the decompression limit
pub fn log_decompression_limit(entry: &str, limit: u64) {
    tracing::warn!(
        operation = LogOperation::MediaExtraction.as_str(),
        entry = entry,
        limit_bytes = limit,
        "Decompressed size limit exceeded, aborting extraction"
    );
}

/// Log a finished transcript parse
pub fn log_chat_parsed(source: &str, messages: usize, participants: usize, media: usize) {
    tracing::info!(
        operation = LogOperation::TranscriptParsing.as_str(),
        source = source,
        message_count = messages,
        participant_count = participants,
        media_count = media,
        "Parsed chat export"
    );
}

/// Log a media handle the registry refused to release
pub fn log_release_failed(handle: &str, error: &dyn Display) {
    tracing::debug!(
        operation = LogOperation::MediaRelease.as_str(),
        handle = handle,
        error = %error,
        "Ignoring media release failure"
    );
}
