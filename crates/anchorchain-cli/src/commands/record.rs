//! Record command implementation.

use anchorchain_canonical::{anchor_hash, Digest, Timestamp};
use anchorchain_core::{VerificationEvent, VerificationStatus};
use chrono::Utc;
use serde_json::json;

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

/// Fields of the verification being recorded.
pub struct RecordInput {
    pub code_id: String,
    pub product_id: String,
    pub product_name: String,
    pub distributor: String,
    pub status: VerificationStatus,
    pub timestamp: Option<String>,
    pub anchor_hash: Option<String>,
    pub secret: Option<String>,
}

pub fn run(args: &LedgerArgs, input: RecordInput, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let RecordInput {
        code_id,
        product_id,
        product_name,
        distributor,
        status,
        timestamp,
        anchor_hash: precomputed,
        secret,
    } = input;

    let timestamp = match timestamp {
        Some(value) => Timestamp::parse(value).map_err(|e| format!("Invalid timestamp: {}", e))?,
        None => Timestamp::from_datetime(Utc::now()),
    };
    let anchor = match (precomputed, secret) {
        (Some(hash), _) => Digest::parse(hash).map_err(|e| format!("Invalid anchor hash: {}", e))?,
        (None, Some(secret)) => anchor_hash(&code_id, &secret),
        (None, None) => {
            return Err("anchor hash required: pass --anchor-hash or set ANCHORCHAIN_ANCHOR_SECRET".into())
        }
    };

    let event = VerificationEvent {
        product_id,
        product_name,
        distributor,
        code_id: code_id.clone(),
        anchor_hash: anchor,
        status,
        timestamp: timestamp.clone(),
    };

    let ledger = open_ledger(args)?;
    let sealed = ledger.record_event(event)?;
    let proof = ledger.proof_for_event(&code_id, Some(&timestamp))?;

    if json {
        let report = json!({ "sealed": sealed, "proof": proof });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if sealed.is_empty() {
        println!("Recorded {} (pending)", code_id);
    } else {
        println!("Recorded {}; sealed {} block(s)", code_id, sealed.len());
        output::print_block_header();
        for block in &sealed {
            println!("{}", output::format_block_row(block));
        }
    }
    if let Some(proof) = proof {
        println!();
        println!("{}", output::format_proof(&code_id, &proof));
    }
    Ok(())
}
