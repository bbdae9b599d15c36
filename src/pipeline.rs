// src/pipeline.rs
//! The whole run, top to bottom: load, fetch, join, aggregate, build figures.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::{
    chart::{gdp_chart, labour_chart, Figure},
    config::Config,
    fetch::TableSource,
    load::{load_earnings, load_gdp, load_unemployment, GdpRecord, LabourRecord, MonthlyValue},
    process::{
        aggregate_causes, annotate_gdp, events_from_table, expand_events, join_labour,
        recent_window, AnnotatedGdp, CauseAggregate, Overrides, RawTable,
    },
};

/// GDP rows with recession names plus the per-cause labels.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpView {
    pub gdp: Vec<AnnotatedGdp>,
    pub causes: Vec<CauseAggregate>,
}

/// Join GDP with the recession table, aggregate causes, then apply `overrides`.
pub fn build_gdp_view(
    gdp: &[GdpRecord],
    recession_table: &RawTable,
    overrides: &Overrides,
) -> Result<GdpView> {
    let events = events_from_table(recession_table)?;
    let expanded = expand_events(&events);
    let mut annotated = annotate_gdp(gdp, &expanded);

    let mut causes = aggregate_causes(&annotated, &events);
    overrides.apply_causes(&mut causes);
    overrides.apply_gdp_labels(&mut annotated);

    Ok(GdpView {
        gdp: annotated,
        causes,
    })
}

/// Joined labour series restricted to the last `years` years before `today`.
pub fn build_labour_view(
    unemployment: &[MonthlyValue],
    earnings: &[MonthlyValue],
    today: NaiveDate,
    years: i64,
) -> Result<Vec<LabourRecord>> {
    let joined = join_labour(unemployment, earnings);
    let recent = recent_window(&joined, today, years)?;
    info!(
        months = recent.len(),
        dropped = joined.len() - recent.len(),
        "windowed labour series"
    );
    Ok(recent)
}

/// Both finished figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    pub gdp: Figure,
    pub labour: Figure,
}

/// Run everything up to (not including) display.
pub fn build_charts(
    cfg: &Config,
    source: &dyn TableSource,
    overrides: &Overrides,
    today: NaiveDate,
) -> Result<Charts> {
    let gdp = load_gdp(&cfg.gdp.path, cfg.gdp.skip_rows)?;

    let url = cfg.recessions_url()?;
    let table = source
        .fetch_table(&url, &cfg.table_class)
        .context("fetching recession table")?;
    let view = build_gdp_view(&gdp, &table, overrides)?;

    let unemployment = load_unemployment(&cfg.unemployment.path, cfg.unemployment.skip_rows)?;
    let earnings = load_earnings(&cfg.earnings.path, cfg.earnings.skip_rows)?;
    let labour = build_labour_view(&unemployment, &earnings, today, cfg.labour_window_years)?;

    Ok(Charts {
        gdp: gdp_chart(&view.gdp, &view.causes),
        labour: labour_chart(&labour).context("building labour-market chart")?,
    })
}
