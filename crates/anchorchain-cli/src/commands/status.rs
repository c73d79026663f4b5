//! Status command implementation.

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub fn run(args: &LedgerArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = open_ledger(args)?.status_summary()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", output::format_status(&status));
    }
    Ok(())
}
