use anchorchain_canonical::{anchor_hash, genesis_merkle_root, CalendarDate, Digest, Timestamp};
use anchorchain_core::{
    merkle_root, Block, BlockDraft, Difficulty, Miner, VerificationEvent, VerificationStatus,
};
use anchorchain_store::file::{BLOCKS_FILE, PENDING_FILE};
use anchorchain_store::{
    FileStore, FileStoreOptions, LedgerStore, MemoryStore, StoreError, TimestampFilter,
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;

fn make_event(code_id: &str, timestamp: &str) -> VerificationEvent {
    VerificationEvent {
        product_id: "PROD-0001".into(),
        product_name: "Madu Hutan".into(),
        distributor: "CV Sumber Rejeki".into(),
        code_id: code_id.into(),
        anchor_hash: anchor_hash(code_id, "test-secret"),
        status: VerificationStatus::FirstVerification,
        timestamp: Timestamp::parse(timestamp).unwrap(),
    }
}

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse(s).unwrap()
}

fn make_chain() -> Vec<Block> {
    let miner = Miner::new(Difficulty::new(1).unwrap());
    let ts = Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap();
    let genesis = miner
        .seal(BlockDraft {
            index: 0,
            date: ts.date(),
            timestamp: ts,
            previous_hash: Digest::zero(),
            merkle_root: genesis_merkle_root(),
            events: Vec::new(),
        })
        .unwrap();

    let mut chain = vec![genesis];
    let batches = [
        vec![
            make_event("PROD-0001-0001", "2024-06-01T10:00:00.000Z"),
            make_event("PROD-0001-0002", "2024-06-01T11:00:00.000Z"),
        ],
        vec![
            make_event("PROD-0001-0001", "2024-06-02T08:00:00.000Z"),
        ],
    ];
    for events in batches {
        let head = chain.last().unwrap().clone();
        let block = miner
            .seal(BlockDraft {
                index: head.index + 1,
                timestamp: events[0].timestamp.clone(),
                previous_hash: head.hash.clone(),
                merkle_root: merkle_root(&events).unwrap(),
                date: events[0].date(),
                events,
            })
            .unwrap();
        chain.push(block);
    }
    chain
}

fn exercise_contract(store: &dyn LedgerStore) {
    assert!(store.latest_block().unwrap().is_none());
    assert!(store.all_blocks().unwrap().is_empty());
    assert!(store.pending_events(&date("2024-06-01")).unwrap().is_empty());

    let chain = make_chain();
    for block in &chain {
        store.insert_block(block).unwrap();
    }
    assert_eq!(store.latest_block().unwrap().unwrap(), chain[2]);
    assert_eq!(store.all_blocks().unwrap(), chain);
    assert_eq!(store.total_sealed_events().unwrap(), 3);

    match store.insert_block(&chain[1]) {
        Err(StoreError::DuplicateBlockIndex { index }) => assert_eq!(index, 1),
        other => panic!("expected DuplicateBlockIndex, got {other:?}"),
    }

    let (event, block) = store.find_event_by_code_id("PROD-0001-0001").unwrap().unwrap();
    assert_eq!(block.index, 2);
    assert_eq!(event.timestamp.as_str(), "2024-06-02T08:00:00.000Z");

    let older = TimestampFilter {
        timestamp: Timestamp::parse("2024-06-01T10:00:00.000Z").unwrap(),
    };
    let (event, block) = store.find_event_matching(&older).unwrap().unwrap();
    assert_eq!(block.index, 1);
    assert_eq!(event.code_id, "PROD-0001-0001");
    assert!(store.find_event_by_code_id("UNKNOWN-CODE").unwrap().is_none());

    let day = date("2024-06-03");
    let first = vec![make_event("PROD-0002-0001", "2024-06-03T09:00:00.000Z")];
    store.upsert_pending(&day, &first).unwrap();
    let mut second = first.clone();
    second.push(make_event("PROD-0002-0002", "2024-06-03T09:05:00.000Z"));
    store.upsert_pending(&day, &second).unwrap();
    assert_eq!(store.pending_events(&day).unwrap(), second);
    assert_eq!(store.all_pending().unwrap().len(), 1);

    store.delete_pending(&day).unwrap();
    store.delete_pending(&day).unwrap();
    assert!(store.all_pending().unwrap().is_empty());
}

#[test]
fn memory_store_honours_contract() {
    exercise_contract(&MemoryStore::new());
}

#[test]
fn file_store_honours_contract() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    exercise_contract(&store);
}

#[test]
fn arc_store_forwards_to_inner() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    exercise_contract(&store);
}

#[test]
fn memory_stores_have_distinct_identities() {
    assert_ne!(MemoryStore::new().identity(), MemoryStore::new().identity());
}

#[test]
fn file_store_identity_follows_directory() {
    let temp_dir = TempDir::new().unwrap();
    let a = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    let b = FileStore::open(temp_dir.path().join("."), FileStoreOptions::default()).unwrap();
    assert_eq!(a.identity(), b.identity());
    assert!(a.identity().starts_with("file:"));
}

#[test]
fn file_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let chain = make_chain();
    let pending = vec![make_event("PROD-0002-0001", "2024-06-03T09:00:00.000Z")];

    {
        let store = FileStore::open(temp_dir.path(), FileStoreOptions { sync: true }).unwrap();
        for block in &chain {
            store.insert_block(block).unwrap();
        }
        store.upsert_pending(&date("2024-06-03"), &pending).unwrap();
    }

    let store = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    assert_eq!(store.all_blocks().unwrap(), chain);
    assert_eq!(store.pending_events(&date("2024-06-03")).unwrap(), pending);
    assert!(temp_dir.path().join(PENDING_FILE).exists());
}

#[test]
fn file_store_refuses_gaps() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    let chain = make_chain();

    match store.insert_block(&chain[1]) {
        Err(StoreError::OutOfOrderBlock { expected, found }) => {
            assert_eq!(expected, 0);
            assert_eq!(found, 1);
        }
        other => panic!("expected OutOfOrderBlock, got {other:?}"),
    }
    assert!(store.all_blocks().unwrap().is_empty());
}

#[test]
fn file_store_discards_torn_tail_on_open() {
    let temp_dir = TempDir::new().unwrap();
    let chain = make_chain();
    {
        let store = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
        store.insert_block(&chain[0]).unwrap();
        store.insert_block(&chain[1]).unwrap();
    }
    let journal = temp_dir.path().join(BLOCKS_FILE);
    let mut file = OpenOptions::new().append(true).open(&journal).unwrap();
    file.write_all(&[0x01, 0, 0, 0, 0xFF, 0, 0, 0, b'{']).unwrap();
    drop(file);

    let store = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    assert_eq!(store.all_blocks().unwrap(), chain[..2].to_vec());
    store.insert_block(&chain[2]).unwrap();
    drop(store);

    let reopened = FileStore::open(temp_dir.path(), FileStoreOptions::default()).unwrap();
    assert_eq!(reopened.all_blocks().unwrap(), chain);
}

#[test]
fn file_store_rejects_corrupt_pending_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(PENDING_FILE), b"not json").unwrap();
    assert!(matches!(
        FileStore::open(temp_dir.path(), FileStoreOptions::default()),
        Err(StoreError::Encoding(_))
    ));
}
