//! Events command implementation.

use anchorchain_canonical::CalendarDate;
use anchorchain_core::VerificationStatus;
use anchorchain_store::{AndFilter, DateRangeFilter, StatusFilter};

use crate::context::{open_ledger, LedgerArgs};
use crate::output;

pub struct EventQuery {
    pub status: Option<VerificationStatus>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_date(value: Option<String>) -> Result<Option<CalendarDate>, String> {
    value
        .map(|v| CalendarDate::parse(v).map_err(|e| format!("Invalid date: {}", e)))
        .transpose()
}

pub fn run(args: &LedgerArgs, query: EventQuery, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut filter = AndFilter::default().with(DateRangeFilter {
        from: parse_date(query.from)?,
        to: parse_date(query.to)?,
    });
    if let Some(status) = query.status {
        filter = filter.with(StatusFilter { status });
    }

    let events = open_ledger(args)?.sealed_events(&filter)?;

    if json {
        for (index, event) in &events {
            let mut value = serde_json::to_value(event)?;
            value["blockIndex"] = (*index).into();
            println!("{}", serde_json::to_string(&value)?);
        }
    } else {
        output::print_event_header();
        for (index, event) in &events {
            println!("{}", output::format_event_row(*index, event));
        }
    }
    Ok(())
}
