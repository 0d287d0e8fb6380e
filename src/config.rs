//! Resource limits for ingestion.
//!
//! Chat exports are picked by users and may come from anywhere, so every
//! stage that can grow with the input is bounded. The defaults match what
//! WhatsApp itself can produce with plenty of headroom.
//!
//! # Example
//!
//! ```rust
//! use chatview::config::IngestConfig;
//!
//! let config = IngestConfig::new()
//!     .with_max_file_size(512 * 1024 * 1024)
//!     .with_max_zip_entries(10_000);
//!
//! assert_eq!(config.max_zip_entries, 10_000);
//! ```

use serde::{Deserialize, Serialize};

const GIB: u64 = 1024 * 1024 * 1024;

/// Limits applied while reading an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Largest accepted input file, in bytes (default: 5 GiB)
    pub max_file_size: u64,

    /// Largest total decompressed archive content, transcript included
    /// (default: 10 GiB)
    pub max_decompressed_size: u64,

    /// Most entries an archive may list (default: 50,000)
    pub max_zip_entries: usize,

    /// Buffer size for decompressing media entries (default: 64KB)
    pub read_chunk_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size: 5 * GIB,
            max_decompressed_size: 10 * GIB,
            max_zip_entries: 50_000,
            read_chunk_size: 64 * 1024, // 64KB
        }
    }
}

impl IngestConfig {
    /// Creates a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum input file size.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Sets the maximum total decompressed size.
    #[must_use]
    pub fn with_max_decompressed_size(mut self, bytes: u64) -> Self {
        self.max_decompressed_size = bytes;
        self
    }

    /// Sets the maximum number of archive entries.
    #[must_use]
    pub fn with_max_zip_entries(mut self, count: usize) -> Self {
        self.max_zip_entries = count;
        self
    }

    /// Sets the decompression buffer size. Zero is raised to one byte.
    #[must_use]
    pub fn with_read_chunk_size(mut self, bytes: usize) -> Self {
        self.read_chunk_size = bytes.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.max_file_size, 5 * GIB);
        assert_eq!(config.max_decompressed_size, 10 * GIB);
        assert_eq!(config.max_zip_entries, 50_000);
        assert_eq!(config.read_chunk_size, 64 * 1024);
    }

    #[test]
    fn test_builders() {
        let config = IngestConfig::new()
            .with_max_file_size(1)
            .with_max_decompressed_size(2)
            .with_max_zip_entries(3)
            .with_read_chunk_size(0);
        assert_eq!(config.max_file_size, 1);
        assert_eq!(config.max_decompressed_size, 2);
        assert_eq!(config.max_zip_entries, 3);
        assert_eq!(config.read_chunk_size, 1);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: IngestConfig = serde_json::from_str(r#"{"max_zip_entries": 7}"#).unwrap();
        assert_eq!(config.max_zip_entries, 7);
        assert_eq!(config.max_file_size, 5 * GIB);
    }
}
