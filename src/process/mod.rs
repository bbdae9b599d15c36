// src/process/mod.rs
//! Reshaping between the raw inputs and the charts: date tokens, the GDP ×
//! recession join, cause aggregation and the labour-market join.

pub mod aggregate;
pub mod date_parser;
pub mod merge;
pub mod overrides;
pub mod raw_table;
pub mod recessions;
pub mod trimming;
pub mod utils;

pub use aggregate::{aggregate_causes, CauseAggregate};
pub use date_parser::extract_date_tokens;
pub use merge::{annotate_gdp, join_labour, max_earnings_point, recent_window, AnnotatedGdp};
pub use overrides::{covid_overrides, Overrides};
pub use raw_table::RawTable;
pub use recessions::{events_from_table, expand_events, ExpandedPeriod, RecessionEvent};
pub use trimming::clean_cause;
