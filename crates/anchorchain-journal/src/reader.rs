//! Journal reader implementation.

use crate::errors::JournalError;
use crate::frame::{FrameHeader, FrameKind, JournalHeader};
use anchorchain_core::Block;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read mode for handling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Strict mode: truncated frames are errors.
    Strict,
    /// Permissive mode: truncation is treated as end-of-file.
    Permissive,
}

/// Sequential reader over a block journal.
pub struct JournalReader {
    input: BufReader<File>,
    mode: ReadMode,
    position: u64,
}

impl JournalReader {
    /// Opens a journal and validates its header.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, JournalError> {
        let mut input = BufReader::new(File::open(path)?);
        let mut header = [0u8; JournalHeader::SIZE];
        input.read_exact(&mut header)?;
        JournalHeader::decode(&header)?;

        Ok(Self {
            input,
            mode,
            position: JournalHeader::SIZE as u64,
        })
    }

    /// Byte offset just past the last complete frame read so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads the next frame, or `None` at end-of-file.
    ///
    /// In permissive mode a frame cut short by a crash also yields `None`
    /// and leaves [`JournalReader::position`] at the start of that frame.
    pub fn read_frame(&mut self) -> Result<Option<(FrameKind, Vec<u8>)>, JournalError> {
        let mut header = [0u8; FrameHeader::SIZE];
        match read_full(&mut self.input, &mut header)? {
            0 => return Ok(None),
            n if n < FrameHeader::SIZE => return self.truncated(),
            _ => {}
        }
        let frame = FrameHeader::decode(&header, self.position)?;

        let mut payload = vec![0u8; frame.len as usize];
        if read_full(&mut self.input, &mut payload)? < payload.len() {
            return self.truncated();
        }

        self.position += (FrameHeader::SIZE + payload.len()) as u64;
        Ok(Some((frame.kind, payload)))
    }

    /// Reads the next block, skipping frames of unknown kind.
    pub fn read_block(&mut self) -> Result<Option<Block>, JournalError> {
        loop {
            let offset = self.position;
            match self.read_frame()? {
                None => return Ok(None),
                Some((FrameKind::BlockJson, payload)) => {
                    let block = serde_json::from_slice(&payload).map_err(|source| {
                        JournalError::InvalidBlock {
                            offset: offset + FrameHeader::SIZE as u64,
                            source,
                        }
                    })?;
                    return Ok(Some(block));
                }
                Some((FrameKind::Unknown(_), _)) => continue,
            }
        }
    }

    /// Reads every remaining block.
    pub fn read_all(&mut self) -> Result<Vec<Block>, JournalError> {
        let mut blocks = Vec::new();
        while let Some(block) = self.read_block()? {
            blocks.push(block);
        }
        Ok(blocks)
    }

    fn truncated<T>(&self) -> Result<Option<T>, JournalError> {
        match self.mode {
            ReadMode::Permissive => Ok(None),
            ReadMode::Strict => Err(JournalError::TruncatedFrame {
                offset: self.position,
            }),
        }
    }
}

/// Reads until `buf` is full or EOF; returns the number of bytes read.
fn read_full(input: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Cuts a torn tail left by an interrupted append.
///
/// Reads the journal permissively and truncates the file to the end of the
/// last complete frame. Returns the number of bytes removed.
pub fn repair_tail<P: AsRef<Path>>(path: P) -> Result<u64, JournalError> {
    let path = path.as_ref();
    let mut reader = JournalReader::open(path, ReadMode::Permissive)?;
    while reader.read_frame()?.is_some() {}
    let valid_len = reader.position();

    let file = OpenOptions::new().write(true).open(path)?;
    let actual_len = file.metadata()?.len();
    if actual_len > valid_len {
        file.set_len(valid_len)?;
        file.sync_all()?;
    }
    Ok(actual_len.saturating_sub(valid_len))
}
