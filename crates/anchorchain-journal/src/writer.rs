//! Journal writer implementation.

use crate::errors::JournalError;
use crate::frame::{FrameHeader, FrameKind, JournalHeader};
use anchorchain_core::Block;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Options for journal writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Whether to fsync after each append (default: false).
    pub sync: bool,
    /// Whether to create the file if it doesn't exist (default: true).
    pub create: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: false,
            create: true,
        }
    }
}

/// Storage a journal can be written to.
///
/// Besides plain I/O the writer needs to cut the storage back to a known
/// length when an append fails partway through.
pub trait JournalSink: Read + Write + Seek {
    /// Truncates the storage to `len` bytes.
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
    /// Forces written data to durable storage.
    fn sync(&mut self) -> io::Result<()>;
}

impl JournalSink for File {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

/// Append-only writer for sealed blocks.
///
/// Each [`JournalWriter::append_block`] writes one frame and flushes it
/// before returning. A failed append is rolled back to the previous end of
/// the journal, so a block is either wholly on disk or absent. Only a crash
/// mid-write leaves a truncated tail, which permissive readers ignore and
/// [`repair_tail`](crate::repair_tail) removes.
pub struct JournalWriter<W: JournalSink = File> {
    file: W,
    sync: bool,
    torn_at: Option<u64>,
}

impl JournalWriter<File> {
    /// Opens or creates a journal for appending.
    ///
    /// An empty file receives a fresh header; a non-empty file must start
    /// with a valid one.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, JournalError> {
        let file = OpenOptions::new()
            .create(options.create)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        Self::from_sink(file, options)
    }
}

impl<W: JournalSink> JournalWriter<W> {
    /// Wraps an already opened sink, writing or validating its header.
    pub fn from_sink(mut file: W, options: WriteOptions) -> Result<Self, JournalError> {
        let len = file.seek(SeekFrom::End(0))?;
        if len == 0 {
            file.write_all(&JournalHeader::default().encode())?;
            file.flush()?;
            if options.sync {
                file.sync()?;
            }
        } else if len < JournalHeader::SIZE as u64 {
            return Err(JournalError::FileNotEmpty);
        } else {
            let mut header = [0u8; JournalHeader::SIZE];
            file.seek(SeekFrom::Start(0))?;
            file.read_exact(&mut header)?;
            JournalHeader::decode(&header)?;
            file.seek(SeekFrom::End(0))?;
        }

        Ok(Self {
            file,
            sync: options.sync,
            torn_at: None,
        })
    }

    /// Appends one sealed block as a JSON frame.
    pub fn append_block(&mut self, block: &Block) -> Result<(), JournalError> {
        let payload = serde_json::to_vec(block)?;
        self.append_raw(FrameKind::BlockJson, &payload)
    }

    /// Appends a raw frame with the given kind and payload.
    ///
    /// If the write fails the journal is truncated back to where the frame
    /// began. When that rollback fails too, the writer refuses further
    /// appends until the journal is reopened and repaired.
    pub fn append_raw(&mut self, kind: FrameKind, payload: &[u8]) -> Result<(), JournalError> {
        if let Some(offset) = self.torn_at {
            return Err(JournalError::TornAppend { offset });
        }
        let header = FrameHeader::new(kind, payload.len())?;
        let mut frame = Vec::with_capacity(FrameHeader::SIZE + payload.len());
        frame.extend_from_slice(&header.encode());
        frame.extend_from_slice(payload);

        let start = self.file.seek(SeekFrom::End(0))?;
        if let Err(err) = self.write_frame(&frame) {
            if self.rollback(start).is_err() {
                tracing::error!(offset = start, "journal rollback failed after short write");
                self.torn_at = Some(start);
            } else {
                tracing::warn!(offset = start, error = %err, "journal append rolled back");
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.file.write_all(frame)?;
        self.file.flush()?;
        if self.sync {
            self.file.sync()?;
        }
        Ok(())
    }

    fn rollback(&mut self, len: u64) -> io::Result<()> {
        self.file.truncate_to(len)?;
        self.file.seek(SeekFrom::Start(len))?;
        if self.sync {
            self.file.sync()?;
        }
        Ok(())
    }

    /// Flushes and closes the journal.
    pub fn finish(mut self) -> Result<(), JournalError> {
        self.file.flush()?;
        if self.sync {
            self.file.sync()?;
        }
        Ok(())
    }
}

impl<W: JournalSink> Drop for JournalWriter<W> {
    fn drop(&mut self) {
        let _ = self.file.flush();
        if self.sync {
            let _ = self.file.sync();
        }
    }
}
