use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::recessions::ExpandedPeriod;
use crate::{
    load::{GdpRecord, LabourRecord, MonthlyValue},
    period::{normalize_period_key, Month, Quarter},
};

/// A GDP quarter, tagged with the recession it opens or closes (if any).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedGdp {
    pub quarter: Quarter,
    pub start: NaiveDate,
    pub growth_pct: f64,
    pub recession: Option<String>,
}

/// Left-join GDP against the exploded recession periods on quarter.
///
/// Output has exactly one row per GDP row, in input order. When several
/// periods land on the same quarter the first one wins.
pub fn annotate_gdp(gdp: &[GdpRecord], periods: &[ExpandedPeriod]) -> Vec<AnnotatedGdp> {
    let mut by_quarter: HashMap<Quarter, &str> = HashMap::new();
    for p in periods {
        let key = normalize_period_key(&p.token);
        let quarter = match key.parse::<Quarter>() {
            Ok(q) => q,
            Err(e) => {
                debug!(token = %p.token, error = %e, "skipping unparsable period token");
                continue;
            }
        };
        if let Some(existing) = by_quarter.get(&quarter) {
            if *existing != p.name {
                warn!(%quarter, kept = *existing, dropped = %p.name, "quarter claimed twice");
            }
            continue;
        }
        by_quarter.insert(quarter, &p.name);
    }

    let out: Vec<AnnotatedGdp> = gdp
        .iter()
        .map(|g| AnnotatedGdp {
            quarter: g.quarter,
            start: g.quarter.start_date(),
            growth_pct: g.growth_pct,
            recession: by_quarter.get(&g.quarter).map(|s| s.to_string()),
        })
        .collect();

    let marked = out.iter().filter(|r| r.recession.is_some()).count();
    info!(rows = out.len(), marked, "annotated GDP with recessions");
    out
}

/// Inner join of unemployment and earnings on month, in unemployment order.
pub fn join_labour(unemployment: &[MonthlyValue], earnings: &[MonthlyValue]) -> Vec<LabourRecord> {
    let mut by_month: HashMap<Month, f64> = HashMap::with_capacity(earnings.len());
    for e in earnings {
        by_month.entry(e.month).or_insert(e.value);
    }

    let out: Vec<LabourRecord> = unemployment
        .iter()
        .filter_map(|u| {
            by_month.get(&u.month).map(|&awe| LabourRecord {
                month: u.month,
                unemployment_pct: u.value,
                avg_earnings_change_pct: awe,
            })
        })
        .collect();
    info!(rows = out.len(), "joined labour series");
    out
}

/// Months starting no earlier than `years * 365` days before `today`.
pub fn recent_window(
    rows: &[LabourRecord],
    today: NaiveDate,
    years: i64,
) -> Result<Vec<LabourRecord>> {
    let cutoff = years
        .checked_mul(365)
        .and_then(Duration::try_days)
        .and_then(|span| today.checked_sub_signed(span))
        .ok_or_else(|| anyhow!("a {}-year window before {} is out of range", years, today))?;
    Ok(rows
        .iter()
        .filter(|r| r.month.start_date() >= cutoff)
        .cloned()
        .collect())
}

/// Highest earnings change; the latest month wins a tie.
pub fn max_earnings_point(rows: &[LabourRecord]) -> Option<&LabourRecord> {
    rows.iter().max_by(|a, b| {
        a.avg_earnings_change_pct
            .total_cmp(&b.avg_earnings_change_pct)
            .then(a.month.cmp(&b.month))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn gdp(rows: &[(&str, f64)]) -> Result<Vec<GdpRecord>> {
        rows.iter()
            .map(|(q, v)| {
                Ok(GdpRecord {
                    quarter: q.parse()?,
                    growth_pct: *v,
                })
            })
            .collect()
    }

    fn period(name: &str, token: &str) -> ExpandedPeriod {
        ExpandedPeriod {
            name: name.into(),
            token: token.into(),
        }
    }

    #[test]
    fn every_gdp_row_appears_once() -> Result<()> {
        let g = gdp(&[("1980 Q1", -0.5), ("1980 Q2", -1.6), ("1980 Q3", 0.2)])?;
        let p = vec![
            period("Early 1980s", "1980 Q1"),
            period("Early 1980s", "1980 Q2"),
            period("Other", "1980 Q2"),
            period("Garbage", "not a quarter"),
        ];
        let out = annotate_gdp(&g, &p);
        assert_eq!(out.len(), g.len());
        for (a, b) in out.iter().zip(&g) {
            assert_eq!(a.quarter, b.quarter);
        }
        assert_eq!(out[0].recession.as_deref(), Some("Early 1980s"));
        assert_eq!(out[1].recession.as_deref(), Some("Early 1980s"));
        assert_eq!(out[2].recession, None);
        assert_eq!(out[0].start, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        Ok(())
    }

    fn monthly(rows: &[(&str, f64)]) -> Result<Vec<MonthlyValue>> {
        rows.iter()
            .map(|(m, v)| {
                Ok(MonthlyValue {
                    month: m.parse()?,
                    value: *v,
                })
            })
            .collect()
    }

    #[test]
    fn labour_join_is_inner() -> Result<()> {
        let u = monthly(&[("2020 JAN", 4.0), ("2020 FEB", 4.1), ("2020 MAR", 4.2)])?;
        let e = monthly(&[("2020 FEB", 2.5), ("2020 MAR", 1.0), ("2020 APR", -1.0)])?;
        let joined = join_labour(&u, &e);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].month, "2020 FEB".parse::<Month>()?);
        assert_eq!(joined[0].unemployment_pct, 4.1);
        assert_eq!(joined[0].avg_earnings_change_pct, 2.5);
        Ok(())
    }

    #[test]
    fn window_and_max_point() -> Result<()> {
        let u = monthly(&[("2017 DEC", 4.4), ("2019 JAN", 3.9), ("2021 JUN", 4.8), ("2021 JUL", 4.6)])?;
        let e = monthly(&[("2017 DEC", 9.0), ("2019 JAN", 3.2), ("2021 JUN", 8.8), ("2021 JUL", 8.8)])?;
        let joined = join_labour(&u, &e);

        let today = NaiveDate::from_ymd_opt(2022, 4, 13).unwrap();
        let recent = recent_window(&joined, today, 4)?;
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].month, "2019 JAN".parse::<Month>()?);

        let max = max_earnings_point(&recent).unwrap();
        assert_eq!(max.month, "2021 JUL".parse::<Month>()?);
        assert!(max_earnings_point(&[]).is_none());

        assert!(recent_window(&joined, today, i64::MAX).is_err());
        assert!(recent_window(&joined, today, 1_000_000_000).is_err());
        Ok(())
    }
}
