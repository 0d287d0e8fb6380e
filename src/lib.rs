//! # Chatview
//!
//! A Rust library for reading WhatsApp chat exports into a structured,
//! navigable conversation, entirely offline.
//!
//! ## Overview
//!
//! WhatsApp exports a chat either as a bare `.txt` transcript or as a `.zip`
//! holding the transcript plus its photos, voice notes and documents.
//! Chatview handles both:
//!
//! - **Transcripts** in the iOS (`[date, time] Sender: text`) and Android
//!   (`date, time - Sender: text`) layouts, with locale-ambiguous dates,
//!   12- and 24-hour clocks, multi-line messages and invisible marks
//! - **Archives** opened under strict limits (file size, entry count,
//!   decompressed size) with path-traversal entries ignored
//! - **Self-detection**: a best guess at which participant exported the chat
//!
//! ## Quick Start
//!
//! ```rust
//! use chatview::parse_chat_text;
//!
//! let text = "\
//! 15/01/2024, 10:30 - Alice: Are we still on for tonight?
//! 15/01/2024, 10:32 - Bob: Yes!
//! See you at 8";
//!
//! let chat = parse_chat_text(text, Some("WhatsApp Chat with Bob.txt"));
//! assert_eq!(chat.messages.len(), 2);
//! assert_eq!(chat.messages[1].body, "Yes!\nSee you at 8");
//! assert_eq!(chat.self_name, "Alice");
//! ```
//!
//! ## Archives and media
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chatview::ingest::{ExportFile, parse_file};
//! use chatview::media::{InMemoryRegistry, release_media};
//!
//! # async fn run() -> chatview::Result<()> {
//! let registry = Arc::new(InMemoryRegistry::new());
//! let file = ExportFile::new("export.zip", std::fs::read("export.zip")?);
//!
//! let chat = parse_file(file, registry.clone()).await?;
//! for msg in &chat.messages {
//!     if let Some(handle) = chat.media_for(msg) {
//!         let blob = registry.get(handle).unwrap();
//!         println!("{} sent {} ({})", msg.sender, blob.name, blob.content_type);
//!     }
//! }
//!
//! // Media stays in the registry until released.
//! release_media(&chat, registry.as_ref());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`ingest`] - [`ChatIngestor`](ingest::ChatIngestor), [`ExportFile`](ingest::ExportFile), [`parse_file`](ingest::parse_file)
//! - [`archive`] - ZIP extraction under resource limits
//! - [`parsing`] - Line grammars, timestamps, assembly, self-detection
//! - [`media`] - [`MediaRegistry`](media::MediaRegistry) and the bundled registries
//! - [`classify`] - Notice detection predicates
//! - [`core`] - Filtering, layout, statistics and output writers
//! - [`config`] - [`IngestConfig`](config::IngestConfig) limits
//! - [`error`] - [`ChatviewError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
pub mod chat;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod media;
pub mod message;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use chat::ParsedChat;
pub use classify::{is_encryption_notice, is_system_like_message};
pub use error::{ChatviewError, Result};
pub use message::Message;
pub use parsing::parse_chat_text;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatview::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::{Message, ParsedChat};

    // Error types
    pub use crate::error::{ChatviewError, Result};

    // Ingestion
    pub use crate::config::IngestConfig;
    pub use crate::ingest::{ChatIngestor, ExportFile, parse_file};
    pub use crate::parsing::parse_chat_text;

    // Media
    pub use crate::media::{
        DirectoryRegistry, InMemoryRegistry, MediaHandle, MediaKind, MediaRegistry, release_media,
    };

    // Classification
    pub use crate::classify::{is_encryption_notice, is_system_like_message};

    // Viewing helpers
    pub use crate::core::{
        ChatStats, DisplayRow, FilterConfig, OutputConfig, apply_filters, date_label, layout_rows,
    };

    // Output
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::OutputFormat;
}
