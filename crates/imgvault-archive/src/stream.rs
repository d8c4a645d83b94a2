//! Incremental ZIP encoder bound to an outbound byte sink.
//!
//! Each entry is deflated into a scratch single-entry archive first, so its
//! CRC and sizes are known before it is spliced into the container with a
//! final local header. Every byte written by an append is therefore final
//! and is sent before the append returns. The container writes into a
//! [`Window`], an in-memory buffer that only allows seeking over bytes that
//! have not been sent yet.

use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;
use imgvault_core::ArchiveEntry;
use tokio::sync::mpsc;
use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{ArchiveError, ArchiveResult};

/// Sending half of an archive body. An `Err` item aborts the response.
pub type ArchiveSink = mpsc::Sender<io::Result<Bytes>>;

// ============================================================================
// Seekable send window
// ============================================================================

#[derive(Debug, Default)]
struct WindowState {
    /// Absolute offset of `buf[0]`; everything before it has been sent.
    released: u64,
    buf: Vec<u8>,
    /// Absolute write cursor.
    pos: u64,
}

impl WindowState {
    fn end(&self) -> u64 {
        self.released + self.buf.len() as u64
    }
}

/// Shared handle to the send window; one clone lives inside the `ZipWriter`.
#[derive(Debug, Clone, Default)]
struct Window(Arc<Mutex<WindowState>>);

impl Window {
    fn lock(&self) -> io::Result<MutexGuard<'_, WindowState>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("archive window lock poisoned"))
    }

    /// Detach every byte before absolute offset `upto`.
    fn take_until(&self, upto: u64) -> io::Result<Bytes> {
        let mut state = self.lock()?;
        let upto = upto.min(state.end());
        let count = usize::try_from(upto.saturating_sub(state.released))
            .map_err(|_| io::Error::other("archive window too large"))?;
        if count == 0 {
            return Ok(Bytes::new());
        }
        let rest = state.buf.split_off(count);
        let head = std::mem::replace(&mut state.buf, rest);
        state.released = upto;
        Ok(Bytes::from(head))
    }

    fn take_all(&self) -> io::Result<Bytes> {
        let end = self.lock()?.end();
        self.take_until(end)
    }
}

impl Write for Window {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut state = self.lock()?;
        let offset = usize::try_from(state.pos - state.released)
            .map_err(|_| io::Error::other("archive window too large"))?;
        let end = offset + data.len();
        if end > state.buf.len() {
            state.buf.resize(end, 0);
        }
        state.buf[offset..end].copy_from_slice(data);
        state.pos += data.len() as u64;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for Window {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let mut state = self.lock()?;
        let target = match from {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => state.end().checked_add_signed(delta),
            SeekFrom::Current(delta) => state.pos.checked_add_signed(delta),
        };
        match target {
            Some(target) if target >= state.released => {
                state.pos = target;
                Ok(target)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cannot seek into archive bytes that were already sent",
            )),
        }
    }
}

// ============================================================================
// Archive stream
// ============================================================================

/// A live ZIP container being written to one sink.
///
/// Append entries with [`append`](Self::append), then call
/// [`finalize`](Self::finalize), which consumes the stream so no append can
/// follow it.
pub struct ArchiveStream {
    zip: Option<ZipWriter<Window>>,
    window: Window,
    sink: ArchiveSink,
    options: SimpleFileOptions,
    entries: usize,
    bytes_sent: u64,
}

impl ArchiveStream {
    /// Bind a new container writer to `sink`.
    ///
    /// Nothing is written until the first entry arrives.
    pub fn open(sink: ArchiveSink, compression_level: i64) -> ArchiveResult<Self> {
        if !(0..=9).contains(&compression_level) {
            return Err(ArchiveError::InvalidCompressionLevel(compression_level));
        }

        let window = Window::default();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level))
            .unix_permissions(0o644);

        Ok(Self {
            zip: Some(ZipWriter::new(window.clone())),
            window,
            sink,
            options,
            entries: 0,
            bytes_sent: 0,
        })
    }

    /// Number of entries appended so far.
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Bytes handed to the sink so far.
    pub const fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Compress one entry into the container and send it.
    ///
    /// Deflate runs on the blocking pool. Fails with
    /// [`ArchiveError::SinkClosed`] once the receiver is gone.
    pub async fn append(&mut self, entry: ArchiveEntry) -> ArchiveResult<()> {
        let mut zip = self.zip.take().ok_or(ArchiveError::Poisoned)?;
        let options = self.options;

        let (zip, written) = tokio::task::spawn_blocking(move || {
            let written = write_entry(&mut zip, &entry, options);
            (zip, written)
        })
        .await?;
        self.zip = Some(zip);

        written?;
        self.entries += 1;

        let ready = self.window.take_all().map_err(ZipError::Io)?;
        self.send(ready).await
    }

    /// Resolves once the receiving side of the sink is gone.
    pub async fn closed(&self) {
        self.sink.closed().await;
    }

    /// Write the central directory, flush it to the sink and close the sink.
    ///
    /// Returns the number of entries in the finished archive.
    pub async fn finalize(mut self) -> ArchiveResult<usize> {
        let zip = self.zip.take().ok_or(ArchiveError::Poisoned)?;

        if let Err(e) = zip.finish() {
            let _ = self.sink.send(Err(io::Error::other(e.to_string()))).await;
            return Err(e.into());
        }

        let tail = self.window.take_all().map_err(ZipError::Io)?;
        self.send(tail).await?;

        debug!(
            entries = self.entries,
            bytes = self.bytes_sent,
            "Archive finalized"
        );
        Ok(self.entries)
    }

    /// Tear the response down instead of ending it cleanly.
    ///
    /// The receiver sees an I/O error, so the client never mistakes a
    /// truncated body for a complete archive.
    pub async fn abort(mut self, reason: &str) {
        self.zip = None;
        let _ = self.sink.send(Err(io::Error::other(reason.to_string()))).await;
    }

    async fn send(&mut self, chunk: Bytes) -> ArchiveResult<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        let len = chunk.len() as u64;
        self.sink
            .send(Ok(chunk))
            .await
            .map_err(|_| ArchiveError::SinkClosed)?;
        self.bytes_sent += len;
        Ok(())
    }
}

/// Deflate one entry on its own, then splice it into the container.
///
/// The spliced local header already carries the CRC and sizes, so nothing
/// before the container's write cursor is touched again.
fn write_entry(
    zip: &mut ZipWriter<Window>,
    entry: &ArchiveEntry,
    options: SimpleFileOptions,
) -> ArchiveResult<()> {
    let mut scratch = ZipWriter::new(Cursor::new(Vec::with_capacity(entry.content.len() + 128)));
    scratch.start_file(entry.name.as_str(), options)?;
    scratch.write_all(&entry.content).map_err(ZipError::Io)?;

    let mut compressed = ZipArchive::new(scratch.finish()?)?;
    let file = compressed.by_index(0)?;
    zip.raw_copy_file(file)?;
    Ok(())
}
