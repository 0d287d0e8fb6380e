//! Ingestion entry point: one picked file in, one [`ParsedChat`] out.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chatview::ingest::ChatIngestor;
//! use chatview::media::InMemoryRegistry;
//!
//! # async fn run() -> chatview::Result<()> {
//! let ingestor = ChatIngestor::new(Arc::new(InMemoryRegistry::new()));
//! let chat = ingestor.parse_path("WhatsApp Chat with Bob.zip").await?;
//!
//! println!("{} messages, {} attachments", chat.message_count(), chat.media.len());
//! ingestor.release(&chat);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::ParsedChat;
use crate::archive::{ZipExtractResult, extract_from_zip};
use crate::config::IngestConfig;
use crate::error::{ChatviewError, Result};
use crate::logging::log_chat_parsed;
use crate::media::{MediaRegistry, release_media};
use crate::parsing::parse_chat_text;

/// A user-picked file: its name, declared content type and bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            data,
        }
    }

    /// Builder method to set the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Reads a file from disk, refusing it before reading when it is larger
    /// than `max_size`.
    pub async fn from_path(path: impl AsRef<Path>, max_size: u64) -> Result<Self> {
        let path = path.as_ref();
        let size = tokio::fs::metadata(path).await?.len();
        if size > max_size {
            return Err(ChatviewError::file_too_large(size, max_size));
        }

        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self::new(name, data))
    }

    /// Returns `true` when the file should be opened as a ZIP export.
    ///
    /// Decided by the `.zip` suffix or a declared ZIP content type, never by
    /// sniffing the bytes.
    pub fn is_archive(&self) -> bool {
        self.name.ends_with(".zip")
            || matches!(
                self.content_type.as_deref(),
                Some("application/zip" | "application/x-zip-compressed")
            )
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Parses exports and owns the registry their media ends up in.
#[derive(Clone)]
pub struct ChatIngestor {
    config: IngestConfig,
    registry: Arc<dyn MediaRegistry>,
}

impl ChatIngestor {
    /// Creates an ingestor with default limits.
    pub fn new(registry: Arc<dyn MediaRegistry>) -> Self {
        Self::with_config(registry, IngestConfig::default())
    }

    pub fn with_config(registry: Arc<dyn MediaRegistry>, config: IngestConfig) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<dyn MediaRegistry> {
        &self.registry
    }

    /// Parses one export.
    ///
    /// A file that is not a WhatsApp export is not an error: the result has
    /// no messages and callers decide how to report that.
    pub async fn parse_file(&self, file: ExportFile) -> Result<ParsedChat> {
        let size = file.size();
        if size > self.config.max_file_size {
            return Err(ChatviewError::file_too_large(size, self.config.max_file_size));
        }

        let chat = if file.is_archive() {
            let ZipExtractResult {
                text,
                media,
                transcript_name,
            } = extract_from_zip(file.data, Arc::clone(&self.registry), &self.config).await?;

            parse_chat_text(&text, Some(&transcript_name)).with_media(media)
        } else {
            let text = String::from_utf8_lossy(&file.data);
            parse_chat_text(&text, Some(&file.name))
        };

        log_chat_parsed(
            &file.name,
            chat.messages.len(),
            chat.participants.len(),
            chat.media.len(),
        );

        Ok(chat)
    }

    /// Reads and parses a file from disk.
    pub async fn parse_path(&self, path: impl AsRef<Path>) -> Result<ParsedChat> {
        let file = ExportFile::from_path(path, self.config.max_file_size).await?;
        self.parse_file(file).await
    }

    /// Releases the media of a chat produced by this ingestor.
    pub fn release(&self, chat: &ParsedChat) {
        release_media(chat, self.registry.as_ref());
    }
}

/// Parses one export with default limits, storing media in `registry`.
pub async fn parse_file(file: ExportFile, registry: Arc<dyn MediaRegistry>) -> Result<ParsedChat> {
    ChatIngestor::new(registry).parse_file(file).await
}
