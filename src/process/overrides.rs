//! Hand-entered corrections for events the scraped table does not carry.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::{aggregate::CauseAggregate, merge::AnnotatedGdp};
use crate::period::Quarter;

/// Extra cause label appended after the aggregated rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CauseOverride {
    pub cause: &'static str,
    pub date: NaiveDate,
    pub value: f64,
}

/// Recession name forced onto one GDP quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpLabelOverride {
    pub quarter: Quarter,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overrides {
    pub causes: Vec<CauseOverride>,
    pub gdp_labels: Vec<GdpLabelOverride>,
}

/// The first Covid-19 lockdown postdates the recession table.
pub fn covid_overrides() -> Result<Overrides> {
    Ok(Overrides {
        causes: vec![CauseOverride {
            cause: "Covid 19 First Lockdown",
            date: NaiveDate::from_ymd_opt(2020, 4, 1).context("covid override date")?,
            value: -19.4,
        }],
        gdp_labels: vec![GdpLabelOverride {
            quarter: Quarter::new(2020, 2)?,
            name: "Covid-19 Lockdown",
        }],
    })
}

impl Overrides {
    pub fn empty() -> Self {
        Self {
            causes: Vec::new(),
            gdp_labels: Vec::new(),
        }
    }

    /// Append the override rows after the (already sorted) aggregates.
    pub fn apply_causes(&self, aggregates: &mut Vec<CauseAggregate>) {
        for o in &self.causes {
            aggregates.push(CauseAggregate {
                cause: o.cause.to_string(),
                mean_period: o.date,
                peak_decline: o.value,
            });
        }
    }

    /// Label matching GDP rows; quarters absent from the series are left alone.
    pub fn apply_gdp_labels(&self, gdp: &mut [AnnotatedGdp]) {
        for o in &self.gdp_labels {
            for row in gdp.iter_mut().filter(|r| r.quarter == o.quarter) {
                info!(quarter = %o.quarter, name = o.name, "applying GDP label override");
                row.recession = Some(o.name.to_string());
            }
        }
    }
}
