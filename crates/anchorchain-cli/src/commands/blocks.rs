//! Blocks command implementation.

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub fn run(args: &LedgerArgs, last: Option<usize>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let blocks = open_ledger(args)?.blocks()?;
    let skip = last.map_or(0, |n| blocks.len().saturating_sub(n));

    if json {
        for block in &blocks[skip..] {
            println!("{}", serde_json::to_string(block)?);
        }
    } else {
        output::print_block_header();
        for block in &blocks[skip..] {
            println!("{}", output::format_block_row(block));
        }
    }
    Ok(())
}
