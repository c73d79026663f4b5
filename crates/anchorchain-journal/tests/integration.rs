use anchorchain_canonical::{anchor_hash, genesis_merkle_root, Digest, Timestamp};
use anchorchain_core::{
    merkle_root, Block, BlockDraft, Difficulty, Miner, VerificationEvent, VerificationStatus,
};
use anchorchain_journal::{
    FrameKind, JournalError, JournalReader, JournalWriter, ReadMode, WriteOptions,
};
use std::fs;
use tempfile::TempDir;

fn make_block(index: u64, previous_hash: Digest, code_id: &str) -> Block {
    let timestamp = Timestamp::parse("2024-06-01T10:00:00.000Z").unwrap();
    let events = if index == 0 {
        Vec::new()
    } else {
        vec![VerificationEvent {
            product_id: "PROD-0001".into(),
            product_name: "Madu Hutan".into(),
            distributor: "CV Sumber Rejeki".into(),
            code_id: code_id.into(),
            anchor_hash: anchor_hash(code_id, "test-secret"),
            status: VerificationStatus::FirstVerification,
            timestamp: timestamp.clone(),
        }]
    };
    let merkle_root = if events.is_empty() {
        genesis_merkle_root()
    } else {
        merkle_root(&events).unwrap()
    };
    Miner::new(Difficulty::new(1).unwrap())
        .seal(BlockDraft {
            index,
            date: timestamp.date(),
            timestamp,
            previous_hash,
            merkle_root,
            events,
        })
        .unwrap()
}

#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let genesis = make_block(0, Digest::zero(), "");
    let first = make_block(1, genesis.hash.clone(), "PROD-0001-0001");

    {
        let mut writer = JournalWriter::open(&path, WriteOptions::default()).unwrap();
        writer.append_block(&genesis).unwrap();
        writer.append_block(&first).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_block().unwrap().unwrap(), genesis);
    assert_eq!(reader.read_block().unwrap().unwrap(), first);
    assert!(reader.read_block().unwrap().is_none());
}

#[test]
fn test_append_to_existing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let genesis = make_block(0, Digest::zero(), "");
    let first = make_block(1, genesis.hash.clone(), "PROD-0001-0001");

    {
        let mut writer = JournalWriter::open(&path, WriteOptions::default()).unwrap();
        writer.append_block(&genesis).unwrap();
    }
    {
        let mut writer = JournalWriter::open(&path, WriteOptions { sync: true, create: true }).unwrap();
        writer.append_block(&first).unwrap();
    }

    let blocks = JournalReader::open(&path, ReadMode::Strict)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(blocks, vec![genesis, first]);
}

#[test]
fn test_empty_journal_has_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    JournalWriter::open(&path, WriteOptions::default())
        .unwrap()
        .finish()
        .unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 16);
    let mut reader = JournalReader::open(&path, ReadMode::Strict).unwrap();
    assert!(reader.read_block().unwrap().is_none());
}

#[test]
fn test_unknown_frames_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    let genesis = make_block(0, Digest::zero(), "");

    {
        let mut writer = JournalWriter::open(&path, WriteOptions::default()).unwrap();
        writer.append_raw(FrameKind::Unknown(0x7F), b"future").unwrap();
        writer.append_block(&genesis).unwrap();
    }

    let blocks = JournalReader::open(&path, ReadMode::Strict)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(blocks, vec![genesis]);
}

#[test]
fn test_refuses_foreign_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    fs::write(&path, b"this is not a journal file").unwrap();

    assert!(matches!(
        JournalWriter::open(&path, WriteOptions::default()),
        Err(JournalError::InvalidHeader(_))
    ));
    assert!(matches!(
        JournalReader::open(&path, ReadMode::Strict),
        Err(JournalError::InvalidHeader(_))
    ));
}

#[test]
fn test_refuses_short_non_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    fs::write(&path, b"ACJ").unwrap();

    assert!(matches!(
        JournalWriter::open(&path, WriteOptions::default()),
        Err(JournalError::FileNotEmpty)
    ));
}

#[test]
fn test_corrupt_block_payload_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("blocks.acj");
    {
        let mut writer = JournalWriter::open(&path, WriteOptions::default()).unwrap();
        writer.append_raw(FrameKind::BlockJson, b"{\"index\":").unwrap();
    }

    let mut reader = JournalReader::open(&path, ReadMode::Permissive).unwrap();
    match reader.read_block() {
        Err(JournalError::InvalidBlock { offset, .. }) => assert_eq!(offset, 24),
        other => panic!("expected InvalidBlock, got {:?}", other.map(|_| ())),
    }
}
