use anchorchain_canonical::{genesis_merkle_root, Digest, Timestamp};
use anchorchain_core::{Block, BlockDraft, Difficulty, Miner};
use anchorchain_journal::frame::MAX_PAYLOAD_SIZE;
use anchorchain_journal::{
    repair_tail, FrameKind, JournalError, JournalReader, JournalSink, JournalWriter, ReadMode,
    WriteOptions,
};
use std::cell::{Cell, RefCell};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;
use tempfile::TempDir;

fn make_genesis() -> Block {
    let timestamp = Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap();
    Miner::new(Difficulty::new(0).unwrap())
        .seal(BlockDraft {
            index: 0,
            date: timestamp.date(),
            timestamp,
            previous_hash: Digest::zero(),
            merkle_root: genesis_merkle_root(),
            events: Vec::new(),
        })
        .unwrap()
}

fn write_with_torn_tail(path: &std::path::Path) -> u64 {
    {
        let mut writer = JournalWriter::open(path, WriteOptions::default()).unwrap();
        writer.append_block(&make_genesis()).unwrap();
    }
    let valid_len = fs::metadata(path).unwrap().len();
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    // frame header promising 100 bytes, followed by only 5
    file.write_all(&[0x01, 0, 0, 0, 100, 0, 0, 0]).unwrap();
    file.write_all(b"{\"ind").unwrap();
    valid_len
}

#[test]
fn test_payload_size_limit() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");

    let oversized = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
    let mut writer = JournalWriter::open(&path, WriteOptions::default()).unwrap();
    match writer.append_raw(FrameKind::BlockJson, &oversized).unwrap_err() {
        JournalError::PayloadTooLarge { size, max } => {
            assert_eq!(size, MAX_PAYLOAD_SIZE as usize + 1);
            assert_eq!(max, MAX_PAYLOAD_SIZE);
        }
        other => panic!("Expected PayloadTooLarge error, got {other}"),
    }
    drop(writer);

    assert_eq!(fs::metadata(&path).unwrap().len(), 16);
}

#[test]
fn test_strict_mode_rejects_torn_tail() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let valid_len = write_with_torn_tail(&path);

    let mut reader = JournalReader::open(&path, ReadMode::Strict).unwrap();
    assert!(reader.read_block().unwrap().is_some());
    match reader.read_block() {
        Err(JournalError::TruncatedFrame { offset }) => assert_eq!(offset, valid_len),
        other => panic!("expected TruncatedFrame, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_permissive_mode_stops_at_torn_tail() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let valid_len = write_with_torn_tail(&path);

    let mut reader = JournalReader::open(&path, ReadMode::Permissive).unwrap();
    assert_eq!(reader.read_all().unwrap(), vec![make_genesis()]);
    assert_eq!(reader.position(), valid_len);
}

#[test]
fn test_repair_tail_truncates_to_last_complete_frame() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let valid_len = write_with_torn_tail(&path);

    assert_eq!(repair_tail(&path).unwrap(), 13);
    assert_eq!(fs::metadata(&path).unwrap().len(), valid_len);
    assert_eq!(repair_tail(&path).unwrap(), 0);

    let blocks = JournalReader::open(&path, ReadMode::Strict)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(blocks.len(), 1);
}

#[test]
fn test_truncated_frame_header_is_torn_tail() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    {
        JournalWriter::open(&path, WriteOptions::default()).unwrap();
    }
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(&[0x01, 0, 0]).unwrap();

    let mut strict = JournalReader::open(&path, ReadMode::Strict).unwrap();
    assert!(matches!(
        strict.read_block(),
        Err(JournalError::TruncatedFrame { offset: 16 })
    ));
    let mut permissive = JournalReader::open(&path, ReadMode::Permissive).unwrap();
    assert!(permissive.read_block().unwrap().is_none());
}

/// In-memory journal storage that can run out of space partway through a write.
#[derive(Clone, Default)]
struct ShortWriteSink {
    data: Rc<RefCell<Vec<u8>>>,
    pos: u64,
    budget: Rc<Cell<Option<usize>>>,
    refuse_truncate: Rc<Cell<bool>>,
}

impl Read for ShortWriteSink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.data.borrow();
        let start = (self.pos as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Write for ShortWriteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = match self.budget.get() {
            None => buf.len(),
            Some(0) => return Err(io::Error::new(io::ErrorKind::Other, "no space left")),
            Some(left) => {
                let n = left.min(buf.len());
                self.budget.set(Some(left - n));
                n
            }
        };
        let mut data = self.data.borrow_mut();
        let start = self.pos as usize;
        if data.len() < start + n {
            data.resize(start + n, 0);
        }
        data[start..start + n].copy_from_slice(&buf[..n]);
        self.pos += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for ShortWriteSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.data.borrow().len() as i64;
        let next = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::End(delta) => len + delta,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
        };
        if next < 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "seek before start"));
        }
        self.pos = next as u64;
        Ok(self.pos)
    }
}

impl JournalSink for ShortWriteSink {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        if self.refuse_truncate.get() {
            return Err(io::Error::new(io::ErrorKind::Other, "truncate refused"));
        }
        self.data.borrow_mut().truncate(len as usize);
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_short_write_is_rolled_back() {
    let sink = ShortWriteSink::default();
    let mut writer = JournalWriter::from_sink(sink.clone(), WriteOptions::default()).unwrap();
    writer.append_block(&make_genesis()).unwrap();
    let committed = sink.data.borrow().len();

    // room for the frame header and a few payload bytes only
    sink.budget.set(Some(12));
    assert!(matches!(
        writer.append_block(&make_genesis()),
        Err(JournalError::Io(_))
    ));
    assert_eq!(sink.data.borrow().len(), committed);

    sink.budget.set(None);
    writer.append_block(&make_genesis()).unwrap();
    drop(writer);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    fs::write(&path, sink.data.borrow().as_slice()).unwrap();
    let blocks = JournalReader::open(&path, ReadMode::Strict)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(blocks, vec![make_genesis(), make_genesis()]);
}

#[test]
fn test_failed_rollback_blocks_further_appends() {
    let sink = ShortWriteSink::default();
    let mut writer = JournalWriter::from_sink(sink.clone(), WriteOptions::default()).unwrap();
    writer.append_block(&make_genesis()).unwrap();
    let committed = sink.data.borrow().len() as u64;

    sink.budget.set(Some(4));
    sink.refuse_truncate.set(true);
    assert!(writer.append_block(&make_genesis()).is_err());

    sink.budget.set(None);
    sink.refuse_truncate.set(false);
    match writer.append_block(&make_genesis()) {
        Err(JournalError::TornAppend { offset }) => assert_eq!(offset, committed),
        other => panic!("expected TornAppend, got {:?}", other),
    }
    assert_eq!(sink.data.borrow().len() as u64, committed + 4);
}
