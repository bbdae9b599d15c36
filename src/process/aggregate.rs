use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use super::{merge::AnnotatedGdp, recessions::RecessionEvent, trimming::clean_cause};
use crate::period::mean_date;

/// One chart label per distinct (cleaned) recession cause.
#[derive(Debug, Clone, PartialEq)]
pub struct CauseAggregate {
    pub cause: String,
    /// Mean start date of the marked quarters; only used to place the label.
    pub mean_period: NaiveDate,
    /// Largest GDP growth value among the marked quarters.
    pub peak_decline: f64,
}

/// Group marked GDP quarters by the cleaned cause of their recession.
///
/// Causes are recovered by recession name (first event with that name).
/// Rows come back sorted by `mean_period`.
pub fn aggregate_causes(gdp: &[AnnotatedGdp], events: &[RecessionEvent]) -> Vec<CauseAggregate> {
    let mut causes_by_name: HashMap<&str, &str> = HashMap::new();
    for ev in events {
        causes_by_name.entry(ev.name.as_str()).or_insert(ev.causes.as_str());
    }

    let mut groups: BTreeMap<String, (Vec<NaiveDate>, f64)> = BTreeMap::new();
    for row in gdp {
        let Some(name) = row.recession.as_deref() else {
            continue;
        };
        let Some(causes) = causes_by_name.get(name) else {
            debug!(name, "marked quarter has no matching event");
            continue;
        };
        let (dates, peak) = groups
            .entry(clean_cause(causes))
            .or_insert_with(|| (Vec::new(), f64::NEG_INFINITY));
        dates.push(row.start);
        *peak = peak.max(row.growth_pct);
    }

    let mut out: Vec<CauseAggregate> = groups
        .into_iter()
        .filter_map(|(cause, (dates, peak))| {
            mean_date(dates).map(|mean_period| CauseAggregate {
                cause,
                mean_period,
                peak_decline: peak,
            })
        })
        .collect();
    out.sort_by_key(|a| a.mean_period);

    info!(causes = out.len(), "aggregated recession causes");
    out
}
