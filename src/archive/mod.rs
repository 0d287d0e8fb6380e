//! ZIP export extraction under resource limits.
//!
//! A WhatsApp "export with media" is a ZIP holding one `.txt` transcript and
//! the attachments it references. Archives are untrusted input, so the
//! extractor:
//!
//! - rejects inputs above [`IngestConfig::max_file_size`]
//! - refuses archives listing more than [`IngestConfig::max_zip_entries`]
//!   entries before decompressing anything
//! - ignores directories, `__MACOSX` metadata and entries whose path could
//!   escape an extraction root
//! - counts every decompressed byte against
//!   [`IngestConfig::max_decompressed_size`] and aborts as soon as the total
//!   crosses it
//!
//! Media entries are inflated concurrently, one blocking task per entry,
//! and handed to a [`MediaRegistry`]. When extraction fails after some blobs
//! were registered, those blobs are released before the error is returned.

mod mime;
mod path;

pub use mime::{DEFAULT_MIME_TYPE, mime_type_for};
pub use path::{is_macos_metadata, is_safe_zip_path, sanitize_filename};

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Seek};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::task::JoinSet;
use zip::ZipArchive;

use crate::config::IngestConfig;
use crate::error::{ChatviewError, Result};
use crate::logging::{
    log_archive_scanned, log_decompression_limit, log_entry_skipped, log_media_unreadable,
    log_release_failed,
};
use crate::media::{MediaHandle, MediaKind, MediaRegistry};

type SharedArchive = ZipArchive<Cursor<Arc<[u8]>>>;

/// What an archive yields before the transcript is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipExtractResult {
    /// Transcript text, decoded as lossy UTF-8.
    pub text: String,
    /// Sanitized media filename to registry handle.
    pub media: BTreeMap<String, MediaHandle>,
    /// Sanitized transcript filename, or the raw entry path when sanitizing
    /// leaves nothing.
    pub transcript_name: String,
}

/// Media entry selected for extraction.
#[derive(Debug, Clone)]
struct MediaEntry {
    index: usize,
    path: String,
    name: String,
}

/// Result of scanning the central directory.
#[derive(Debug)]
struct ArchiveLayout {
    entry_count: usize,
    transcript: Option<(usize, String)>,
    media: Vec<MediaEntry>,
}

/// An opened archive with its transcript already read.
struct ScannedArchive {
    archive: SharedArchive,
    entry_count: usize,
    transcript_path: String,
    text: String,
    media: Vec<MediaEntry>,
}

/// Shared running total of decompressed bytes.
#[derive(Debug)]
struct DecompressionBudget {
    used: AtomicU64,
    limit: u64,
    exceeded: AtomicBool,
}

impl DecompressionBudget {
    fn new(initial: u64, limit: u64) -> Self {
        Self {
            used: AtomicU64::new(initial),
            limit,
            exceeded: AtomicBool::new(initial > limit),
        }
    }

    /// Adds `bytes` to the total, failing once the total passes the limit.
    fn consume(&self, bytes: u64) -> Result<()> {
        let total = self.used.fetch_add(bytes, Ordering::SeqCst).saturating_add(bytes);
        if total > self.limit {
            self.exceeded.store(true, Ordering::SeqCst);
            return Err(ChatviewError::archive_too_large(self.limit));
        }
        Ok(())
    }

    fn is_exceeded(&self) -> bool {
        self.exceeded.load(Ordering::SeqCst)
    }
}

/// Handles stored by media tasks that have not been joined yet.
struct InFlightMedia {
    registry: Arc<dyn MediaRegistry>,
    state: Mutex<InFlightState>,
}

#[derive(Default)]
struct InFlightState {
    abandoned: bool,
    handles: Vec<MediaHandle>,
}

impl InFlightMedia {
    fn new(registry: Arc<dyn MediaRegistry>) -> Self {
        Self {
            registry,
            state: Mutex::new(InFlightState::default()),
        }
    }

    fn is_abandoned(&self) -> bool {
        self.lock().abandoned
    }

    /// Records a freshly stored handle.
    ///
    /// Returns `false` after releasing the handle if the extraction was
    /// abandoned in the meantime.
    fn track(&self, handle: &MediaHandle) -> bool {
        let mut state = self.lock();
        if state.abandoned {
            drop(state);
            release_quietly(self.registry.as_ref(), handle);
            return false;
        }
        state.handles.push(handle.clone());
        true
    }

    /// Called once every task is joined; ownership of the tracked handles
    /// passes to the joining code.
    fn settle(&self) {
        self.lock().handles.clear();
    }

    fn abandon(&self) {
        let handles = {
            let mut state = self.lock();
            state.abandoned = true;
            std::mem::take(&mut state.handles)
        };
        for handle in &handles {
            release_quietly(self.registry.as_ref(), handle);
        }
    }

    fn lock(&self) -> MutexGuard<'_, InFlightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Abandons the in-flight set when the extraction future goes away.
struct AbandonOnDrop(Arc<InFlightMedia>);

impl Drop for AbandonOnDrop {
    fn drop(&mut self) {
        self.0.abandon();
    }
}

/// Extracts the transcript and media from a ZIP export.
///
/// Blocking work runs on tokio's blocking pool. Every media blob is stored in
/// `registry`; the caller owns the returned handles.
///
/// Dropping the returned future before it resolves abandons the extraction.
/// Handles registered so far are released, entries not yet started are
/// skipped, and entries still inflating release their blob once stored.
///
/// # Errors
///
/// - [`ChatviewError::FileTooLarge`] for inputs above the size limit
/// - [`ChatviewError::Archive`] if the data is not a readable ZIP
/// - [`ChatviewError::TooManyEntries`] for oversized directories
/// - [`ChatviewError::NoTranscript`] or [`ChatviewError::UnreadableTranscript`]
/// - [`ChatviewError::ArchiveTooLarge`] when decompression crosses the limit
pub async fn extract_from_zip(
    data: Vec<u8>,
    registry: Arc<dyn MediaRegistry>,
    config: &IngestConfig,
) -> Result<ZipExtractResult> {
    let size = data.len() as u64;
    if size > config.max_file_size {
        return Err(ChatviewError::file_too_large(size, config.max_file_size));
    }

    let bytes: Arc<[u8]> = data.into();
    let scan_config = config.clone();
    let ScannedArchive {
        archive,
        entry_count,
        transcript_path,
        text,
        media,
    } = tokio::task::spawn_blocking(move || open_and_scan(bytes, &scan_config)).await??;

    log_archive_scanned(entry_count, &transcript_path, media.len());

    let budget = Arc::new(DecompressionBudget::new(
        text.len() as u64,
        config.max_decompressed_size,
    ));
    if budget.is_exceeded() {
        log_decompression_limit(&transcript_path, config.max_decompressed_size);
        return Err(ChatviewError::archive_too_large(config.max_decompressed_size));
    }

    let media = extract_media(archive, media, registry, budget, config.read_chunk_size).await?;

    let sanitized = sanitize_filename(&transcript_path);
    let transcript_name = if sanitized.is_empty() {
        transcript_path
    } else {
        sanitized
    };

    Ok(ZipExtractResult {
        text,
        media,
        transcript_name,
    })
}

/// Opens the archive, classifies its entries and reads the transcript.
fn open_and_scan(bytes: Arc<[u8]>, config: &IngestConfig) -> Result<ScannedArchive> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let layout = scan_entries(&mut archive, config.max_zip_entries)?;

    let (index, transcript_path) = layout.transcript.ok_or(ChatviewError::NoTranscript)?;
    let text = read_transcript(
        &mut archive,
        index,
        &transcript_path,
        config.max_decompressed_size,
    )?;

    Ok(ScannedArchive {
        archive,
        entry_count: layout.entry_count,
        transcript_path,
        text,
        media: layout.media,
    })
}

/// Walks the central directory without decompressing anything.
fn scan_entries<R: Read + Seek>(archive: &mut ZipArchive<R>, max_entries: usize) -> Result<ArchiveLayout> {
    let entry_count = archive.len();
    if entry_count > max_entries {
        return Err(ChatviewError::too_many_entries(entry_count, max_entries));
    }

    let mut layout = ArchiveLayout {
        entry_count,
        transcript: None,
        media: Vec::new(),
    };

    for index in 0..entry_count {
        let (path, is_dir) = match archive.by_index_raw(index) {
            Ok(entry) => (entry.name().to_string(), entry.is_dir()),
            Err(e) => {
                log_entry_skipped(&format!("#{index}"), &e.to_string());
                continue;
            }
        };

        if is_dir {
            continue;
        }
        if is_macos_metadata(&path) {
            log_entry_skipped(&path, "macOS metadata");
            continue;
        }
        if !is_safe_zip_path(&path) {
            log_entry_skipped(&path, "unsafe path");
            continue;
        }

        if path.to_ascii_lowercase().ends_with(".txt") {
            if layout.transcript.is_none() {
                layout.transcript = Some((index, path));
            } else {
                log_entry_skipped(&path, "additional transcript");
            }
        } else if MediaKind::from_filename(&path).is_some() {
            let name = sanitize_filename(&path);
            if name.is_empty() {
                log_entry_skipped(&path, "empty filename");
                continue;
            }
            layout.media.push(MediaEntry { index, path, name });
        }
    }

    Ok(layout)
}

/// Inflates the transcript, reading at most one byte past `limit`.
fn read_transcript<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    path: &str,
    limit: u64,
) -> Result<String> {
    let entry = archive
        .by_index(index)
        .map_err(|e| ChatviewError::unreadable_transcript(path, io::Error::from(e)))?;

    let mut raw = Vec::new();
    entry
        .take(limit.saturating_add(1))
        .read_to_end(&mut raw)
        .map_err(|e| ChatviewError::unreadable_transcript(path, e))?;

    if raw.len() as u64 > limit {
        log_decompression_limit(path, limit);
        return Err(ChatviewError::archive_too_large(limit));
    }

    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Runs one blocking task per media entry and collects the handles.
///
/// Results are applied in archive order, so when two entries sanitize to the
/// same name the later entry wins and the earlier handle is released.
async fn extract_media(
    archive: SharedArchive,
    entries: Vec<MediaEntry>,
    registry: Arc<dyn MediaRegistry>,
    budget: Arc<DecompressionBudget>,
    chunk_size: usize,
) -> Result<BTreeMap<String, MediaHandle>> {
    let in_flight = Arc::new(InFlightMedia::new(Arc::clone(&registry)));
    let _abandon = AbandonOnDrop(Arc::clone(&in_flight));

    let mut tasks = JoinSet::new();
    for entry in entries {
        let archive = archive.clone();
        let registry = Arc::clone(&registry);
        let budget = Arc::clone(&budget);
        let in_flight = Arc::clone(&in_flight);
        tasks.spawn_blocking(move || -> Result<Option<(usize, String, MediaHandle)>> {
            if in_flight.is_abandoned() {
                return Ok(None);
            }
            let index = entry.index;
            let stored = extract_media_entry(archive, entry, registry.as_ref(), &budget, chunk_size)?;
            Ok(stored.and_then(|(name, handle)| {
                in_flight.track(&handle).then_some((index, name, handle))
            }))
        });
    }

    let mut stored = Vec::new();
    let mut failure: Option<ChatviewError> = None;

    // Every task is joined even after a failure so no handle is leaked.
    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(ChatviewError::from).and_then(|result| result) {
            Ok(Some(item)) => stored.push(item),
            Ok(None) => {}
            Err(e) => {
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }
    in_flight.settle();

    if let Some(err) = failure {
        for (_, _, handle) in &stored {
            release_quietly(registry.as_ref(), handle);
        }
        return Err(err);
    }

    stored.sort_by_key(|(index, _, _)| *index);

    let mut media = BTreeMap::new();
    for (_, name, handle) in stored {
        if let Some(replaced) = media.insert(name, handle) {
            release_quietly(registry.as_ref(), &replaced);
        }
    }

    Ok(media)
}

/// Inflates and registers one media entry.
///
/// Unreadable entries yield `Ok(None)`. Only the decompression limit is an
/// error.
///
/// Bytes inflated before a read error stay charged to `budget` even though
/// the entry itself is skipped.
fn extract_media_entry(
    mut archive: SharedArchive,
    entry: MediaEntry,
    registry: &dyn MediaRegistry,
    budget: &DecompressionBudget,
    chunk_size: usize,
) -> Result<Option<(String, MediaHandle)>> {
    if budget.is_exceeded() {
        return Ok(None);
    }

    let mut file = match archive.by_index(entry.index) {
        Ok(file) => file,
        Err(e) => {
            log_media_unreadable(&entry.path, &e);
            return Ok(None);
        }
    };

    let mut data = Vec::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    loop {
        let n = match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log_media_unreadable(&entry.path, &e);
                return Ok(None);
            }
        };

        if let Err(e) = budget.consume(n as u64) {
            log_decompression_limit(&entry.path, budget.limit);
            return Err(e);
        }
        data.extend_from_slice(&chunk[..n]);
    }
    drop(file);

    match registry.register(&entry.name, mime_type_for(&entry.name), data) {
        Ok(handle) => Ok(Some((entry.name, handle))),
        Err(e) => {
            log_media_unreadable(&entry.path, &e);
            Ok(None)
        }
    }
}

fn release_quietly(registry: &dyn MediaRegistry, handle: &MediaHandle) {
    if let Err(e) = registry.release(handle) {
        log_release_failed(handle.as_str(), &e);
    }
}
