//! Entry point for the code verification flow.

use anchorchain_core::VerificationEvent;
use anchorchain_store::LedgerStore;
use tracing::warn;

use crate::ledger::Ledger;
use crate::proof::EventProof;

/// Records a verification and returns the ledger's proof for it.
///
/// Ledger failures are logged and reported as `None`; a verification never
/// fails because the ledger is unavailable.
pub fn anchor_verification<S: LedgerStore>(
    ledger: &Ledger<S>,
    event: VerificationEvent,
) -> Option<EventProof> {
    let code_id = event.code_id.clone();
    let timestamp = event.timestamp.clone();

    if let Err(err) = ledger.record_event(event) {
        warn!(code_id = %code_id, error = %err, "failed to record verification event");
        return None;
    }

    match ledger.proof_for_event(&code_id, Some(&timestamp)) {
        Ok(proof) => proof,
        Err(err) => {
            warn!(code_id = %code_id, error = %err, "failed to fetch ledger proof");
            None
        }
    }
}
