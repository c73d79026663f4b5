//! Output formatting utilities.

use anchorchain_chain::{EventProof, ProofAnchor, StatusSummary};
use anchorchain_core::{Block, ChainViolation, VerificationEvent};

/// Prints the block table header.
#[allow(clippy::print_literal)]
pub fn print_block_header() {
    println!(
        "{:<6} {:<10} {:<24} {:<6} {:<10} {}",
        "INDEX", "DATE", "TIMESTAMP", "EVENTS", "NONCE", "HASH"
    );
    println!("{}", "-".repeat(100));
}

/// Formats a block as a table row.
pub fn format_block_row(block: &Block) -> String {
    format!(
        "{:<6} {:<10} {:<24} {:<6} {:<10} {}",
        block.index,
        block.date,
        block.timestamp,
        block.events.len(),
        block.nonce,
        truncate(block.hash.as_str(), 40)
    )
}

/// Prints the event table header.
#[allow(clippy::print_literal)]
pub fn print_event_header() {
    println!(
        "{:<6} {:<24} {:<22} {:<20} {}",
        "BLOCK", "TIMESTAMP", "STATUS", "CODE", "PRODUCT"
    );
    println!("{}", "-".repeat(100));
}

/// Formats a sealed event as a table row.
pub fn format_event_row(block_index: u64, event: &VerificationEvent) -> String {
    format!(
        "{:<6} {:<24} {:<22} {:<20} {}",
        block_index,
        event.timestamp,
        event.status.as_str(),
        truncate(&event.code_id, 20),
        event.product_id
    )
}

/// Formats a proof as `key: value` lines.
pub fn format_proof(code_id: &str, proof: &EventProof) -> String {
    let mut lines = vec![
        format!("code:         {code_id}"),
        format!("status:       {}", proof.status.as_str()),
        format!("anchor hash:  {}", proof.anchor_hash),
        format!("anchor date:  {}", proof.anchor_date),
    ];
    match &proof.anchor {
        ProofAnchor::Sealed {
            block_hash,
            block_index,
            block_timestamp,
            merkle_root,
        } => {
            lines.push(format!("block:        #{block_index} at {block_timestamp}"));
            lines.push(format!("block hash:   {block_hash}"));
            lines.push(format!("merkle root:  {merkle_root}"));
        }
        ProofAnchor::Pending { pending_count } => {
            lines.push(format!(
                "block:        pending ({pending_count} event(s) waiting for this date)"
            ));
        }
    }
    lines.join("\n")
}

/// Formats a status summary as `key: value` lines.
pub fn format_status(status: &StatusSummary) -> String {
    [
        format!("last anchor date:    {}", status.last_anchor_date),
        format!("total activations:   {}", status.total_activations),
        format!("latest merkle root:  {}", status.latest_merkle_root),
        format!("pending today:       {}", status.pending_today),
        format!("height:              {}", status.height),
        format!("difficulty:          {}", status.difficulty),
    ]
    .join("\n")
}

/// Formats one audit finding.
pub fn format_violation(violation: &ChainViolation) -> String {
    format!("  - {violation}")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
