// src/period.rs

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, NaiveDate};
use std::{fmt, str::FromStr};

const MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Trim and collapse every internal whitespace run to a single `-`.
///
/// `"1973 Q4"` → `"1973-Q4"`. Applying it twice yields the same key.
pub fn normalize_period_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

/// A calendar quarter, e.g. `1973-Q4`. Only built through [`Quarter::new`], so
/// the start date always exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quarter {
    year: i32,
    quarter: u8,
    start: NaiveDate,
}

impl Quarter {
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            bail!("quarter must be 1..=4, got {}", quarter);
        }
        let start = NaiveDate::from_ymd_opt(year, u32::from(quarter - 1) * 3 + 1, 1)
            .ok_or_else(|| anyhow!("year {} is out of range", year))?;
        Ok(Self {
            year,
            quarter,
            start,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// First day of the quarter's first month.
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

/// Accepts `YYYY Qn`, `YYYY-Qn` and `YYYYQn`.
impl FromStr for Quarter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_period_key(s).to_ascii_uppercase();
        let (year, q) = key
            .split_once('Q')
            .ok_or_else(|| anyhow!("not a quarter: {:?}", s))?;
        let year = year.trim_end_matches('-');
        if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
            bail!("bad year in quarter {:?}", s);
        }
        let year: i32 = year.parse()?;
        let quarter: u8 = q
            .parse()
            .map_err(|_| anyhow!("bad quarter number in {:?}", s))?;
        Self::new(year, quarter)
    }
}

/// A calendar month, e.g. `2020 MAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u8,
    start: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("month must be 1..=12, got {}", month);
        }
        let start = NaiveDate::from_ymd_opt(year, u32::from(month), 1)
            .ok_or_else(|| anyhow!("year {} is out of range", year))?;
        Ok(Self { year, month, start })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbrev = MONTH_ABBREVS[usize::from(self.month - 1)];
        write!(f, "{} {}", self.year, abbrev)
    }
}

/// Accepts the ONS layout `YYYY MON` as well as `YYYY-MM`.
impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_period_key(s).to_ascii_uppercase();
        let (year, rest) = key
            .split_once('-')
            .ok_or_else(|| anyhow!("not a month: {:?}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| anyhow!("bad year in month {:?}", s))?;

        let month = match MONTH_ABBREVS.iter().position(|m| rest.starts_with(m)) {
            Some(idx) => idx as u8 + 1,
            None => rest
                .parse::<u8>()
                .map_err(|_| anyhow!("bad month in {:?}", s))?,
        };
        Self::new(year, month)
    }
}

/// Mean of a set of dates, rounded to the nearest day. `None` when empty.
pub fn mean_date<I>(dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let (sum, n) = dates
        .into_iter()
        .fold((0i64, 0i64), |(sum, n), d| (sum + i64::from(d.num_days_from_ce()), n + 1));
    if n == 0 {
        return None;
    }
    let mean = (sum as f64 / n as f64).round() as i32;
    NaiveDate::from_num_days_from_ce_opt(mean)
}
