use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{date_parser::extract_date_tokens, raw_table::RawTable};

/// One row of the recession reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecessionEvent {
    pub name: String,
    /// Start (and usually end) quarter as written, e.g. `"1973 Q4"`.
    pub period_tokens: Vec<String>,
    pub causes: String,
}

/// One `(event name, quarter token)` pair after exploding the token lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedPeriod {
    pub name: String,
    pub token: String,
}

/// Project the scraped table onto `Name` / `Dates` / `Causes`.
pub fn events_from_table(table: &RawTable) -> Result<Vec<RecessionEvent>> {
    let name_col = table.column("Name").context("recession table")?;
    let dates_col = table.column("Dates").context("recession table")?;
    let causes_col = table.column("Causes").context("recession table")?;

    let events: Vec<RecessionEvent> = (0..table.rows.len())
        .map(|i| {
            let dates = table.cell(i, dates_col);
            let period_tokens = extract_date_tokens(dates);
            if period_tokens.is_empty() {
                debug!(row = i, dates, "no quarter tokens in dates cell");
            }
            RecessionEvent {
                name: table.cell(i, name_col).to_string(),
                period_tokens,
                causes: table.cell(i, causes_col).to_string(),
            }
        })
        .collect();

    info!(events = events.len(), "read recession table");
    Ok(events)
}

/// One row per token per event, preserving event order then token order.
pub fn expand_events(events: &[RecessionEvent]) -> Vec<ExpandedPeriod> {
    events
        .iter()
        .flat_map(|ev| {
            ev.period_tokens.iter().map(move |token| ExpandedPeriod {
                name: ev.name.clone(),
                token: token.clone(),
            })
        })
        .collect()
}
