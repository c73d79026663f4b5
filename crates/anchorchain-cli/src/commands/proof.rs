//! Proof command implementation.

use anchorchain_canonical::Timestamp;

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub fn run(
    args: &LedgerArgs,
    code_id: String,
    timestamp: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = timestamp
        .map(Timestamp::parse)
        .transpose()
        .map_err(|e| format!("Invalid timestamp: {}", e))?;

    let ledger = open_ledger(args)?;
    let proof = ledger
        .proof_for_event(&code_id, timestamp.as_ref())?
        .ok_or_else(|| format!("No ledger entry for code {}", code_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&proof)?);
    } else {
        println!("{}", output::format_proof(&code_id, &proof));
    }
    Ok(())
}
