// src/load/series.rs

use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::{collections::HashSet, fs::File, io::Read, path::Path};
use tracing::{debug, info};

use super::{GdpRecord, MonthlyValue};
use crate::{
    period::{Month, Quarter},
    process::utils::clean_str,
};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "xlsb", "ods"];

/// A raw `(period, value)` pair after the header block.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    /// 1-based record number in the source, for error messages.
    pub line: usize,
    pub period: String,
    pub value: f64,
}

/// Turn one record into a row. `None` for a fully blank record.
fn project_row(line: usize, mut fields: Vec<String>) -> Result<Option<SeriesRow>> {
    if fields.iter().all(|f| f.is_empty()) {
        return Ok(None);
    }
    if fields.len() != 2 {
        bail!(
            "record {} has {} columns, expected period and value",
            line,
            fields.len()
        );
    }
    let value: f64 = fields[1]
        .parse()
        .with_context(|| format!("record {}: value {:?} is not a number", line, fields[1]))?;
    let period = fields.swap_remove(0);
    Ok(Some(SeriesRow {
        line,
        period,
        value,
    }))
}

/// Skip `skip_rows` records, then read every remaining record as `period,value`.
/// Fully blank records are ignored; anything else that does not fit is an error.
pub fn read_series<R: Read>(reader: R, skip_rows: usize) -> Result<Vec<SeriesRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut out = Vec::new();
    for (idx, result) in rdr.records().enumerate().skip(skip_rows) {
        let line = idx + 1;
        let record = result.with_context(|| format!("CSV parse error at record {}", line))?;
        let fields = record.iter().map(clean_str).collect();
        out.extend(project_row(line, fields)?);
    }
    Ok(out)
}

/// Same as [`read_series`] over worksheet rows. `first_row` is the sheet row
/// the range starts at, so skip counts and line numbers refer to the sheet.
pub fn read_sheet_rows<'a, I>(rows: I, first_row: usize, skip_rows: usize) -> Result<Vec<SeriesRow>>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut out = Vec::new();
    for (idx, cells) in rows.into_iter().enumerate() {
        let row = first_row + idx;
        if row < skip_rows {
            continue;
        }
        let mut fields: Vec<String> = cells.iter().map(|c| clean_str(&c.to_string())).collect();
        // the range is as wide as the widest row
        while fields.len() > 2 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        out.extend(project_row(row + 1, fields)?);
    }
    Ok(out)
}

/// First worksheet of an Excel or ODS workbook.
fn read_workbook(path: &Path, skip_rows: usize) -> Result<Vec<SeriesRow>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("{} has no worksheets", path.display()))?
        .with_context(|| format!("reading first worksheet of {}", path.display()))?;
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    read_sheet_rows(range.rows(), first_row, skip_rows)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SPREADSHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Spreadsheet or CSV, picked by file extension.
fn read_extract(path: &Path, skip_rows: usize) -> Result<Vec<SeriesRow>> {
    if is_spreadsheet(path) {
        read_workbook(path, skip_rows)
    } else {
        let file = File::open(path)
            .with_context(|| format!("opening series extract {}", path.display()))?;
        read_series(file, skip_rows)
    }
}

/// Load quarterly GDP growth. Duplicate quarters are rejected.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_gdp<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<Vec<GdpRecord>> {
    let path = path.as_ref();
    let rows = read_extract(path, skip_rows)
        .with_context(|| format!("reading GDP extract {}", path.display()))?;

    let mut seen = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let quarter = row
            .period
            .parse::<Quarter>()
            .with_context(|| format!("{} record {}", path.display(), row.line))?;
        if !seen.insert(quarter) {
            bail!("{}: quarter {} appears twice", path.display(), quarter);
        }
        out.push(GdpRecord {
            quarter,
            growth_pct: row.value,
        });
    }
    info!(rows = out.len(), "loaded GDP series");
    Ok(out)
}

fn load_monthly(path: &Path, skip_rows: usize, what: &str) -> Result<Vec<MonthlyValue>> {
    let rows = read_extract(path, skip_rows)
        .with_context(|| format!("reading {} extract {}", what, path.display()))?;

    let out = rows
        .into_iter()
        .map(|row| {
            let month = row
                .period
                .parse::<Month>()
                .with_context(|| format!("{} record {}", path.display(), row.line))?;
            Ok(MonthlyValue {
                month,
                value: row.value,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(what, rows = out.len(), "loaded monthly series");
    Ok(out)
}

#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_unemployment<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<Vec<MonthlyValue>> {
    load_monthly(path.as_ref(), skip_rows, "unemployment")
}

#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_earnings<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<Vec<MonthlyValue>> {
    load_monthly(path.as_ref(), skip_rows, "average earnings")
}
