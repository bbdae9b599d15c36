// src/config.rs
//! Run configuration: built-in defaults, then an optional YAML file named by
//! `UKECON_CONFIG`, then individual `UKECON_*` environment variables.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};
use url::Url;

use crate::chart::DisplayTarget;

pub const CONFIG_ENV: &str = "UKECON_CONFIG";

const MAX_LABOUR_WINDOW_YEARS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    #[default]
    Browser,
    Directory,
    Stdout,
}

impl std::str::FromStr for DisplayKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browser" => Ok(Self::Browser),
            "directory" | "dir" => Ok(Self::Directory),
            "stdout" => Ok(Self::Stdout),
            other => bail!("unknown display target {:?}", other),
        }
    }
}

/// A series extract on disk and how many leading rows to drop, counting the
/// title row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesSource {
    pub path: PathBuf,
    pub skip_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gdp: SeriesSource,
    pub unemployment: SeriesSource,
    pub earnings: SeriesSource,
    pub recessions_url: String,
    pub table_class: String,
    /// Serve the recession table from a saved page instead of the network.
    pub recessions_fixture: Option<PathBuf>,
    /// Unset means wait for the server indefinitely.
    pub http_timeout_secs: Option<u64>,
    pub display: DisplayKind,
    pub output_dir: PathBuf,
    /// Years of labour-market history in the second chart.
    pub labour_window_years: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gdp: SeriesSource {
                path: PathBuf::from("GDP.xls"),
                skip_rows: 8,
            },
            unemployment: SeriesSource {
                path: PathBuf::from("unemployment.xls"),
                skip_rows: 263,
            },
            earnings: SeriesSource {
                path: PathBuf::from("average earnings.xls"),
                skip_rows: 8,
            },
            recessions_url: "https://en.wikipedia.org/wiki/List_of_recessions_in_the_United_Kingdom"
                .to_string(),
            table_class: "wikitable".to_string(),
            recessions_fixture: None,
            http_timeout_secs: None,
            display: DisplayKind::Browser,
            output_dir: PathBuf::from("charts"),
            labour_window_years: 4,
        }
    }
}

impl Config {
    /// Defaults, overlaid by the YAML file in `UKECON_CONFIG` (if set) and then
    /// by `UKECON_*` variables.
    pub fn load() -> Result<Self> {
        let mut cfg = match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_env(|key| env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("UKECON_GDP_PATH") {
            self.gdp.path = v.into();
        }
        if let Some(v) = lookup("UKECON_UNEMPLOYMENT_PATH") {
            self.unemployment.path = v.into();
        }
        if let Some(v) = lookup("UKECON_EARNINGS_PATH") {
            self.earnings.path = v.into();
        }
        if let Some(v) = lookup("UKECON_RECESSIONS_URL") {
            self.recessions_url = v;
        }
        if let Some(v) = lookup("UKECON_RECESSIONS_FIXTURE") {
            self.recessions_fixture = Some(v.into());
        }
        if let Some(v) = lookup("UKECON_HTTP_TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("UKECON_HTTP_TIMEOUT_SECS={:?}", v))?;
            self.http_timeout_secs = Some(secs);
        }
        if let Some(v) = lookup("UKECON_DISPLAY") {
            self.display = v.parse()?;
        }
        if let Some(v) = lookup("UKECON_OUTPUT_DIR") {
            self.output_dir = v.into();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.recessions_url()?;
        if self.table_class.trim().is_empty() {
            bail!("table_class must not be empty");
        }
        if !(1..=MAX_LABOUR_WINDOW_YEARS).contains(&self.labour_window_years) {
            bail!(
                "labour_window_years must be 1..={}, got {}",
                MAX_LABOUR_WINDOW_YEARS,
                self.labour_window_years
            );
        }
        Ok(())
    }

    pub fn recessions_url(&self) -> Result<Url> {
        Url::parse(&self.recessions_url)
            .with_context(|| format!("invalid recessions_url {:?}", self.recessions_url))
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    pub fn display_target(&self) -> DisplayTarget {
        match self.display {
            DisplayKind::Browser => DisplayTarget::Browser,
            DisplayKind::Directory => DisplayTarget::Directory(self.output_dir.clone()),
            DisplayKind::Stdout => DisplayTarget::Stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_source_layout() -> Result<()> {
        let cfg = Config::default();
        cfg.validate()?;
        assert_eq!(cfg.gdp.skip_rows, 8);
        assert_eq!(cfg.unemployment.skip_rows, 263);
        assert_eq!(cfg.earnings.skip_rows, 8);
        assert_eq!(cfg.table_class, "wikitable");
        assert_eq!(cfg.http_timeout(), None);
        assert_eq!(cfg.display_target(), DisplayTarget::Browser);
        Ok(())
    }

    #[test]
    fn yaml_overrides_only_what_it_names() -> Result<()> {
        let cfg = Config::from_yaml(
            r#"
gdp:
  path: data/gdp.csv
  skip_rows: 9
display: directory
output_dir: out
"#,
        )?;
        assert_eq!(cfg.gdp.path, PathBuf::from("data/gdp.csv"));
        assert_eq!(cfg.gdp.skip_rows, 9);
        assert_eq!(cfg.unemployment.skip_rows, 263);
        assert_eq!(cfg.display_target(), DisplayTarget::Directory("out".into()));
        Ok(())
    }

    #[test]
    fn env_overrides_win() -> Result<()> {
        let vars: HashMap<&str, &str> = [
            ("UKECON_GDP_PATH", "/tmp/g.csv"),
            ("UKECON_DISPLAY", "stdout"),
            ("UKECON_HTTP_TIMEOUT_SECS", "30"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_env(|k| vars.get(k).map(|v| v.to_string()))?;
        assert_eq!(cfg.gdp.path, PathBuf::from("/tmp/g.csv"));
        assert_eq!(cfg.display, DisplayKind::Stdout);
        assert_eq!(cfg.http_timeout(), Some(Duration::from_secs(30)));
        Ok(())
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut cfg = Config::default();
        assert!(cfg
            .apply_env(|k| (k == "UKECON_DISPLAY").then(|| "hologram".to_string()))
            .is_err());

        let mut cfg = Config::default();
        cfg.recessions_url = "not a url".into();
        assert!(cfg.validate().is_err());

        let cfg = Config {
            labour_window_years: i64::MAX,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
