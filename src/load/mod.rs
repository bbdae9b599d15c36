// src/load/mod.rs
//! Readers for ONS time-series extracts.
//!
//! The extracts carry a block of metadata rows (title, CDID, source dataset…)
//! followed by `period,value` rows. Callers pass how many leading rows to skip;
//! everything after that must be exactly two columns.

pub mod series;

pub use series::{load_earnings, load_gdp, load_unemployment, read_series, SeriesRow};

use crate::period::{Month, Quarter};

/// One quarter of GDP growth.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRecord {
    pub quarter: Quarter,
    pub growth_pct: f64,
}

/// One monthly observation of a single labour-market series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyValue {
    pub month: Month,
    pub value: f64,
}

/// Unemployment and earnings for the same month.
#[derive(Debug, Clone, PartialEq)]
pub struct LabourRecord {
    pub month: Month,
    pub unemployment_pct: f64,
    pub avg_earnings_change_pct: f64,
}
