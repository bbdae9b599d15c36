use anyhow::Result;
use chrono::NaiveDate;
use std::{fs, path::Path};
use tempfile::tempdir;
use ukecon::{
    chart::{Coord, DisplayTarget},
    config::{Config, SeriesSource},
    fetch::{FixtureTableSource, TableSource},
    load::load_gdp,
    period::Quarter,
    pipeline::{build_charts, build_gdp_view},
    process::{covid_overrides, Overrides},
};
use url::Url;

const RECESSION_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<table class="wikitable sortable">
<tr><th>Name</th><th>Dates</th><th>Duration (quarters)</th><th>GDP decline (peak to trough)</th><th>Causes</th></tr>
<tr><td>Oil shock</td><td>1973&nbsp;Q4 – 1974&nbsp;Q1</td><td>2</td><td>−3.4%</td><td>Oil crisis[3], miners' strike</td></tr>
<tr><td>Early 1980s recession</td><td>1980 Q1<br>1981 Q1</td><td>5</td><td>−4.6%</td><td>Monetarism[7], high interest rates</td></tr>
<tr><td>Unknown dip</td><td>sometime</td><td>?</td><td>?</td><td>Unclear</td></tr>
</table>
</body></html>"#;

fn write_gdp(dir: &Path) -> Result<std::path::PathBuf> {
    let mut csv = String::from("\"Title\",\"GDP growth\"\n\"CDID\",\"IHYQ\"\n");
    for year in 1973..=1981 {
        for q in 1..=4 {
            let growth = if year == 1974 && q == 1 { -2.5 } else { 0.5 };
            csv.push_str(&format!("\"{} Q{}\",\"{}\"\n", year, q, growth));
        }
    }
    let path = dir.join("gdp.csv");
    fs::write(&path, csv)?;
    Ok(path)
}

fn write_monthly(dir: &Path, name: &str, start_year: i32, values: &[f64]) -> Result<std::path::PathBuf> {
    let months = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];
    let mut csv = String::from("\"Title\",\"x\"\n");
    for (i, v) in values.iter().enumerate() {
        let year = start_year + (i / 12) as i32;
        csv.push_str(&format!("\"{} {}\",\"{}\"\n", year, months[i % 12], v));
    }
    let path = dir.join(name);
    fs::write(&path, csv)?;
    Ok(path)
}

#[test]
fn synthetic_table_marks_expected_quarters() -> Result<()> {
    let dir = tempdir()?;
    let gdp = load_gdp(write_gdp(dir.path())?, 2)?;

    let source = FixtureTableSource::from_html(RECESSION_PAGE);
    let table = source.fetch_table(&Url::parse("https://example.org/recessions")?, "wikitable")?;
    let view = build_gdp_view(&gdp, &table, &Overrides::empty())?;

    // join completeness
    assert_eq!(view.gdp.len(), gdp.len());

    let marked: Vec<(Quarter, &str)> = view
        .gdp
        .iter()
        .filter_map(|r| r.recession.as_deref().map(|n| (r.quarter, n)))
        .collect();
    assert_eq!(
        marked,
        vec![
            (Quarter::new(1973, 4)?, "Oil shock"),
            (Quarter::new(1974, 1)?, "Oil shock"),
            (Quarter::new(1980, 1)?, "Early 1980s recession"),
            (Quarter::new(1981, 1)?, "Early 1980s recession"),
        ]
    );

    let causes: Vec<(&str, f64)> = view
        .causes
        .iter()
        .map(|c| (c.cause.as_str(), c.peak_decline))
        .collect();
    assert_eq!(causes, vec![("Oil crisis", 0.5), ("Monetarism", 0.5)]);
    Ok(())
}

#[test]
fn full_run_builds_both_charts() -> Result<()> {
    let dir = tempdir()?;

    // 2019 JAN .. 2021 DEC; earnings spike in 2021 JUN
    let unemployment: Vec<f64> = (0..36).map(|i| 3.8 + i as f64 * 0.03).collect();
    let earnings: Vec<f64> = (0..36)
        .map(|i| if i == 29 { 8.8 } else { 2.0 })
        .collect();

    let cfg = Config {
        gdp: SeriesSource {
            path: write_gdp(dir.path())?,
            skip_rows: 2,
        },
        unemployment: SeriesSource {
            path: write_monthly(dir.path(), "unemployment.csv", 2019, &unemployment)?,
            skip_rows: 1,
        },
        earnings: SeriesSource {
            path: write_monthly(dir.path(), "earnings.csv", 2019, &earnings)?,
            skip_rows: 1,
        },
        ..Config::default()
    };

    let today = NaiveDate::from_ymd_opt(2022, 4, 13).unwrap();
    let source = FixtureTableSource::from_html(RECESSION_PAGE);
    let charts = build_charts(&cfg, &source, &covid_overrides()?, today)?;

    // GDP chart: 2 aggregated causes + the Covid override label
    let labels: Vec<&str> = charts
        .gdp
        .layout
        .annotations
        .iter()
        .map(|a| a.text.as_str())
        .collect();
    assert_eq!(labels, vec!["Oil crisis", "Monetarism", "Covid 19 First Lockdown"]);

    // labour chart: peak marker sits on 2021 JUN
    let peak = &charts.labour.data[2];
    assert_eq!(
        peak.x,
        vec![Coord::Date(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap())]
    );
    assert_eq!(peak.y, vec![8.8]);

    DisplayTarget::Directory(dir.path().join("out")).show("labour_market", "Labour", &charts.labour)?;
    assert!(dir.path().join("out/labour_market.html").exists());
    Ok(())
}

#[test]
fn missing_table_aborts_the_run() -> Result<()> {
    let dir = tempdir()?;
    let cfg = Config {
        gdp: SeriesSource {
            path: write_gdp(dir.path())?,
            skip_rows: 2,
        },
        ..Config::default()
    };
    let source = FixtureTableSource::from_html("<html><body>No tables here</body></html>");
    let today = NaiveDate::from_ymd_opt(2022, 4, 13).unwrap();
    assert!(build_charts(&cfg, &source, &covid_overrides()?, today).is_err());
    Ok(())
}
