//! Seal command implementation.

use anchorchain_canonical::CalendarDate;
use chrono::Utc;

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub fn run(args: &LedgerArgs, up_to: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let cutoff = match up_to {
        Some(value) => CalendarDate::parse(value).map_err(|e| format!("Invalid date: {}", e))?,
        None => CalendarDate::from_datetime(Utc::now()),
    };

    let ledger = open_ledger(args)?;
    let sealed = ledger.anchor_pending_up_to(&cutoff)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sealed)?);
    } else if sealed.is_empty() {
        println!("Nothing pending up to {}", cutoff);
    } else {
        output::print_block_header();
        for block in &sealed {
            println!("{}", output::format_block_row(block));
        }
    }
    Ok(())
}
