use std::sync::Arc;

use anchorchain_canonical::{CalendarDate, Digest, Timestamp};
use anchorchain_core::{
    merkle_root, verify_chain, Block, BlockDraft, ChainReport, Miner, VerificationEvent,
};
use anchorchain_store::{
    latest_pending_match, AndFilter, CodeIdFilter, EventFilter, LedgerStore, TimestampFilter,
};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::LedgerConfig;
use crate::errors::ChainError;
use crate::proof::EventProof;
use crate::status::{StatusSummary, NO_ANCHOR_YET, NO_MERKLE_ROOT};

/// Owns the chain of one store: genesis, sealing passes and reads.
///
/// The manager performs no locking of its own. Every method assumes the
/// caller holds the ledger's exclusive scope; [`crate::Ledger`] is the
/// handle that enforces this.
pub struct ChainManager<S> {
    store: S,
    miner: Miner,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
}

impl<S: LedgerStore> ChainManager<S> {
    /// Creates a manager over `store`.
    pub fn new(store: S, config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            miner: Miner::new(config.difficulty),
            config,
            clock,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_datetime(self.clock.now())
    }

    fn today(&self) -> CalendarDate {
        CalendarDate::from_datetime(self.clock.now())
    }

    /// Returns the chain head, mining and persisting genesis first if the
    /// store holds no blocks.
    pub fn ensure_genesis(&self) -> Result<Block, ChainError> {
        if let Some(head) = self.store.latest_block()? {
            return Ok(head);
        }

        let timestamp = self.config.genesis_timestamp.clone();
        let draft = BlockDraft {
            index: 0,
            date: timestamp.date(),
            timestamp,
            previous_hash: Digest::zero(),
            merkle_root: merkle_root(&[])?,
            events: Vec::new(),
        };
        let genesis = self.miner.seal(draft)?;
        self.store.insert_block(&genesis)?;
        info!(
            hash = %genesis.hash,
            nonce = genesis.nonce,
            difficulty = %self.config.difficulty,
            "created genesis block"
        );
        Ok(genesis)
    }

    /// Appends `event` to its date's pending pool, then seals every pool
    /// dated on or before the event. Returns the blocks sealed.
    pub fn record_event(&self, event: VerificationEvent) -> Result<Vec<Block>, ChainError> {
        self.ensure_genesis()?;

        let date = event.date();
        let mut pending = self.store.pending_events(&date)?;
        pending.push(event);
        self.store.upsert_pending(&date, &pending)?;
        debug!(date = %date, pending = pending.len(), "appended pending event");

        self.anchor_pending_up_to(&date)
    }

    /// Seals every pending pool dated on or before `cutoff`, oldest first.
    ///
    /// Empty pools are dropped without producing a block. A pool is removed
    /// only after its block has been written, so a failed pass leaves it in
    /// place for the next one. Running twice with the same cutoff seals
    /// nothing the second time.
    pub fn anchor_pending_up_to(&self, cutoff: &CalendarDate) -> Result<Vec<Block>, ChainError> {
        self.ensure_genesis()?;

        let eligible: Vec<_> = self
            .store
            .all_pending()?
            .into_iter()
            .filter(|(date, _)| date <= cutoff)
            .collect();

        let mut sealed = Vec::new();
        for (date, events) in eligible {
            if events.is_empty() {
                self.store.delete_pending(&date)?;
                continue;
            }

            let head = self
                .store
                .latest_block()?
                .ok_or_else(|| ChainError::InvariantViolation {
                    index: 0,
                    reason: "chain head vanished during sealing pass".to_string(),
                })?;
            let draft = BlockDraft {
                index: head.index + 1,
                timestamp: self.now(),
                previous_hash: head.hash.clone(),
                merkle_root: merkle_root(&events)?,
                date: date.clone(),
                events,
            };
            let block = self.miner.seal(draft)?;
            self.append_block(&block)?;
            self.store.delete_pending(&date)?;

            info!(
                index = block.index,
                date = %block.date,
                nonce = block.nonce,
                events = block.events.len(),
                hash = %block.hash,
                "sealed block"
            );
            sealed.push(block);
        }
        Ok(sealed)
    }

    /// Writes `block` after checking that it extends the current head.
    fn append_block(&self, block: &Block) -> Result<(), ChainError> {
        let head = self.store.latest_block()?;
        let (expected_index, expected_previous) = match &head {
            Some(head) => (head.index + 1, head.hash.clone()),
            None => (0, Digest::zero()),
        };
        if block.index != expected_index {
            return Err(ChainError::InvariantViolation {
                index: block.index,
                reason: format!("expected index {expected_index}"),
            });
        }
        if block.previous_hash != expected_previous {
            return Err(ChainError::InvariantViolation {
                index: block.index,
                reason: format!(
                    "previous hash {} does not match head {}",
                    block.previous_hash, expected_previous
                ),
            });
        }
        self.store.insert_block(block)?;
        Ok(())
    }

    /// Looks up the newest event for `code_id`, restricted to `timestamp`
    /// when given. Pools dated up to today are sealed first.
    ///
    /// Sealed blocks are searched newest first, then the pending pool newest
    /// date first. `None` means the ledger holds no such event.
    pub fn proof_for_event(
        &self,
        code_id: &str,
        timestamp: Option<&Timestamp>,
    ) -> Result<Option<EventProof>, ChainError> {
        self.anchor_pending_up_to(&self.today())?;

        let mut filter = AndFilter::default().with(CodeIdFilter::new(code_id));
        if let Some(timestamp) = timestamp {
            filter = filter.with(TimestampFilter {
                timestamp: timestamp.clone(),
            });
        }

        if let Some((event, block)) = self.store.find_event_matching(&filter)? {
            debug!(code_id, index = block.index, "proof found in sealed block");
            return Ok(Some(EventProof::sealed(&event, &block)));
        }

        let pending = self.store.all_pending()?;
        match latest_pending_match(&pending, &filter) {
            Some(found) => {
                debug!(code_id, date = %found.date, "proof found in pending pool");
                Ok(Some(EventProof::pending(found)))
            }
            None => {
                debug!(code_id, "no proof for code");
                Ok(None)
            }
        }
    }

    /// Summarizes the ledger after sealing pools dated up to today.
    pub fn status_summary(&self) -> Result<StatusSummary, ChainError> {
        let today = self.today();
        self.anchor_pending_up_to(&today)?;

        let head = self.ensure_genesis()?;
        let (last_anchor_date, latest_merkle_root) = if head.is_genesis() {
            (NO_ANCHOR_YET.to_string(), NO_MERKLE_ROOT.to_string())
        } else {
            (head.date.to_string(), head.merkle_root.to_string())
        };

        Ok(StatusSummary {
            last_anchor_date,
            total_activations: self.store.total_sealed_events()?,
            latest_merkle_root,
            pending_today: self.store.pending_events(&today)?.len(),
            height: head.index,
            difficulty: self.config.difficulty,
        })
    }

    /// Every block, index ascending, after sealing pools dated up to today.
    pub fn blocks(&self) -> Result<Vec<Block>, ChainError> {
        self.anchor_pending_up_to(&self.today())?;
        Ok(self.store.all_blocks()?)
    }

    /// Sealed events accepted by `filter`, paired with their block index.
    ///
    /// Blocks are walked in index order after sealing pools dated up to
    /// today; pending events are not included.
    pub fn sealed_events(
        &self,
        filter: &dyn EventFilter,
    ) -> Result<Vec<(u64, VerificationEvent)>, ChainError> {
        let blocks = self.blocks()?;
        Ok(blocks
            .into_iter()
            .flat_map(|block| {
                let index = block.index;
                block.events.into_iter().map(move |event| (index, event))
            })
            .filter(|(_, event)| filter.matches(event))
            .collect())
    }

    /// Audits the stored chain without sealing anything.
    pub fn verify(&self) -> Result<ChainReport, ChainError> {
        let blocks = self.store.all_blocks()?;
        Ok(verify_chain(&blocks, self.config.difficulty)?)
    }
}
