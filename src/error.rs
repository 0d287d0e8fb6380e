//! Unified error types for chatview.
//!
//! This module provides a single [`ChatviewError`] enum that covers every way
//! an ingestion can fail. The `Display` output of each variant is meant to be
//! shown to the person who picked the file, so sizes are rendered in a
//! human-readable form.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Degraded input** (a broken attachment, an empty transcript) is not an
//!   error at all: it yields a smaller but valid [`ParsedChat`](crate::ParsedChat)

use std::io;

use thiserror::Error;

use crate::format::format_file_size;

/// A specialized [`Result`] type for chatview operations.
///
/// # Example
///
/// ```rust
/// use chatview::error::Result;
/// use chatview::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatviewError>;

/// The error type for all chatview operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatviewError {
    /// An I/O error occurred while reading the input file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input file is larger than the configured upload limit.
    #[error(
        "File too large ({}). Maximum allowed is {}.",
        size_label(.actual),
        size_label(.max)
    )]
    FileTooLarge {
        /// Size of the rejected file in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// The archive decompresses to more than the configured limit.
    ///
    /// Raised as soon as the running total crosses the limit, not after the
    /// whole archive has been inflated.
    #[error(
        "ZIP decompressed content exceeds the safety limit ({}). The file may be a zip bomb.",
        size_label(.max)
    )]
    ArchiveTooLarge {
        /// Configured decompression limit in bytes
        max: u64,
    },

    /// The archive lists more entries than allowed.
    #[error("ZIP contains too many files ({count}). Maximum allowed is {max}.")]
    TooManyEntries {
        /// Number of entries reported by the archive
        count: usize,
        /// Configured limit
        max: usize,
    },

    /// The archive holds no `.txt` transcript.
    #[error("No .txt file found in the ZIP archive.")]
    NoTranscript,

    /// The transcript entry exists but could not be decompressed.
    #[error("Failed to read the chat text file '{name}' from the ZIP archive: {source}")]
    UnreadableTranscript {
        /// Path of the transcript entry inside the archive
        name: String,
        /// The underlying read error
        #[source]
        source: io::Error,
    },

    /// The container itself is not a readable ZIP archive.
    #[error("Unreadable ZIP archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A media registry refused to store or release a blob.
    #[error("Media registry error: {0}")]
    Registry(String),

    /// A background extraction task died before reporting a result.
    #[error("Extraction task failed: {0}")]
    Task(String),

    /// Invalid date in a filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn size_label(bytes: &u64) -> String {
    format_file_size(*bytes)
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatviewError {
    /// Creates a file-size error.
    pub fn file_too_large(actual: u64, max: u64) -> Self {
        ChatviewError::FileTooLarge { actual, max }
    }

    /// Creates a decompression-limit error.
    pub fn archive_too_large(max: u64) -> Self {
        ChatviewError::ArchiveTooLarge { max }
    }

    /// Creates an entry-count error.
    pub fn too_many_entries(count: usize, max: usize) -> Self {
        ChatviewError::TooManyEntries { count, max }
    }

    /// Creates an unreadable-transcript error.
    pub fn unreadable_transcript(name: impl Into<String>, source: io::Error) -> Self {
        ChatviewError::UnreadableTranscript {
            name: name.into(),
            source,
        }
    }

    /// Creates a registry error.
    pub fn registry(message: impl Into<String>) -> Self {
        ChatviewError::Registry(message.into())
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatviewError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatviewError::Io(_))
    }

    /// Returns `true` if an input or decompression size limit was exceeded.
    pub fn is_too_large(&self) -> bool {
        matches!(
            self,
            ChatviewError::FileTooLarge { .. } | ChatviewError::ArchiveTooLarge { .. }
        )
    }

    /// Returns `true` if the archive is structurally unusable.
    pub fn is_invalid_archive(&self) -> bool {
        matches!(
            self,
            ChatviewError::NoTranscript
                | ChatviewError::UnreadableTranscript { .. }
                | ChatviewError::Archive(_)
        )
    }

    /// Returns `true` if the archive lists too many entries.
    pub fn is_too_many_entries(&self) -> bool {
        matches!(self, ChatviewError::TooManyEntries { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatviewError::InvalidDate { .. })
    }
}

impl From<tokio::task::JoinError> for ChatviewError {
    fn from(err: tokio::task::JoinError) -> Self {
        ChatviewError::Task(err.to_string())
    }
}
