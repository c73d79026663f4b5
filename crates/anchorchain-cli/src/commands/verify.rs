//! Verify command implementation.

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub fn run(args: &LedgerArgs, strict: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = open_ledger(args)?.verify()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_valid() {
        println!("OK: {} block(s) verified", report.blocks_checked);
    } else {
        println!(
            "INVALID: {} violation(s) in {} block(s)",
            report.violations.len(),
            report.blocks_checked
        );
        for violation in &report.violations {
            println!("{}", output::format_violation(violation));
        }
    }

    if strict && !report.is_valid() {
        return Err(format!("chain audit found {} violation(s)", report.violations.len()).into());
    }
    Ok(())
}
