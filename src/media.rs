//! Media handles and the registries that own the blobs behind them.
//!
//! Extracted attachments are not stored in [`ParsedChat`](crate::ParsedChat).
//! The extractor hands each blob to a [`MediaRegistry`] and keeps only the
//! returned [`MediaHandle`]. Handles stay valid until released, so whoever
//! displays the chat must call [`release_media`] when the chat is discarded.
//!
//! Two registries ship with the crate:
//!
//! - [`InMemoryRegistry`] keeps blobs in a map, for tests and embedders
//! - [`DirectoryRegistry`] writes blobs to disk, the handle is the file path
//!
//! # Example
//!
//! ```
//! use chatview::media::{InMemoryRegistry, MediaRegistry};
//!
//! let registry = InMemoryRegistry::new();
//! let handle = registry.register("photo.jpg", "image/jpeg", vec![0xFF, 0xD8])?;
//! assert_eq!(registry.get(&handle).unwrap().data, vec![0xFF, 0xD8]);
//!
//! registry.release(&handle)?;
//! assert!(registry.get(&handle).is_none());
//! # Ok::<(), chatview::ChatviewError>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::ParsedChat;
use crate::error::{ChatviewError, Result};
use crate::logging::log_release_failed;

/// Opaque key for a blob held by a [`MediaRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(String);

impl MediaHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for extracted attachments.
///
/// Implementations are called from blocking worker threads, one call per
/// media entry, possibly in parallel.
pub trait MediaRegistry: Send + Sync {
    /// Stores a blob and returns the handle it can be released with.
    fn register(&self, name: &str, content_type: &str, data: Vec<u8>) -> Result<MediaHandle>;

    /// Frees the blob behind `handle`.
    ///
    /// Releasing an unknown or already released handle may fail.
    fn release(&self, handle: &MediaHandle) -> Result<()>;
}

/// Releases every media handle of `chat`.
///
/// Failures are logged and ignored, so calling this twice is harmless.
pub fn release_media(chat: &ParsedChat, registry: &dyn MediaRegistry) {
    for handle in chat.media.values() {
        if let Err(e) = registry.release(handle) {
            log_release_failed(handle.as_str(), &e);
        }
    }
}

/// How a viewer should present an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    /// Classifies a filename by its extension, case-insensitively.
    ///
    /// Returns `None` for files outside the supported media set.
    ///
    /// ```
    /// use chatview::media::MediaKind;
    ///
    /// assert_eq!(MediaKind::from_filename("IMG-0001.JPG"), Some(MediaKind::Image));
    /// assert_eq!(MediaKind::from_filename("PTT-0001.opus"), Some(MediaKind::Audio));
    /// assert_eq!(MediaKind::from_filename("notes.txt"), None);
    /// ```
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(MediaKind::Image),
            "mp4" | "3gp" | "mov" | "avi" => Some(MediaKind::Video),
            "opus" | "ogg" | "mp3" | "m4a" | "aac" => Some(MediaKind::Audio),
            "pdf" => Some(MediaKind::Document),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// In-memory registry
// ============================================================================

/// A blob stored by [`InMemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Registry that keeps blobs in memory under `mem://<n>` handles.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    blobs: Mutex<HashMap<MediaHandle, MediaBlob>>,
    next_id: AtomicU64,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the blob behind `handle`, if it is still live.
    pub fn get(&self, handle: &MediaHandle) -> Option<MediaBlob> {
        self.lock().ok()?.get(handle).cloned()
    }

    /// Number of live blobs.
    pub fn len(&self) -> usize {
        self.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<MediaHandle, MediaBlob>>> {
        self.blobs
            .lock()
            .map_err(|_| ChatviewError::registry("in-memory registry lock poisoned"))
    }
}

impl MediaRegistry for InMemoryRegistry {
    fn register(&self, name: &str, content_type: &str, data: Vec<u8>) -> Result<MediaHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = MediaHandle::new(format!("mem://{id}"));
        let blob = MediaBlob {
            name: name.to_string(),
            content_type: content_type.to_string(),
            data,
        };
        self.lock()?.insert(handle.clone(), blob);
        Ok(handle)
    }

    fn release(&self, handle: &MediaHandle) -> Result<()> {
        match self.lock()?.remove(handle) {
            Some(_) => Ok(()),
            None => Err(ChatviewError::registry(format!("unknown handle {handle}"))),
        }
    }
}

// ============================================================================
// Directory registry
// ============================================================================

/// Registry that writes each blob to `<dir>/<n>-<name>`.
///
/// The handle is the path of the written file, so a viewer can open it
/// directly. The numeric prefix keeps files apart when two archive entries
/// share a basename.
#[derive(Debug)]
pub struct DirectoryRegistry {
    root: PathBuf,
    next_id: AtomicU64,
}

impl DirectoryRegistry {
    /// Creates the registry, creating `dir` if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            next_id: AtomicU64::new(0),
        })
    }

    /// Directory the blobs are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file behind `handle`.
    pub fn path(&self, handle: &MediaHandle) -> PathBuf {
        PathBuf::from(handle.as_str())
    }
}

impl MediaRegistry for DirectoryRegistry {
    fn register(&self, name: &str, _content_type: &str, data: Vec<u8>) -> Result<MediaHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let path = self.root.join(format!("{id}-{name}"));
        fs::write(&path, data)?;
        Ok(MediaHandle::new(path.to_string_lossy()))
    }

    /// Removes the file behind `handle`.
    ///
    /// Only files directly inside the registry directory are removed. A
    /// handle with a `..` segment or a nested path is refused, even when it
    /// starts with the directory.
    fn release(&self, handle: &MediaHandle) -> Result<()> {
        let path = self.path(handle);
        let direct_child = path.parent() == Some(self.root.as_path())
            && matches!(path.components().next_back(), Some(Component::Normal(_)));
        if !direct_child {
            return Err(ChatviewError::registry(format!(
                "handle {handle} is outside {}",
                self.root.display()
            )));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}
