// src/chart/mod.rs
//! Figure model for the two charts.
//!
//! The types serialize to plotly.js figure JSON (`{"data": [...], "layout": {...}}`)
//! so a page only needs to hand the JSON to `Plotly.newPlot`. Only the
//! attributes the charts actually use are modelled.

pub mod display;
pub mod gdp;
pub mod html;
pub mod labour;

pub use display::DisplayTarget;
pub use gdp::{gdp_chart, label_offsets, LabelOffsets};
pub use labour::labour_chart;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

pub const BLUE: &str = "#005AB5";
pub const RED: &str = "#DC3220";
pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// An x or y position: a calendar date or a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coord {
    Date(NaiveDate),
    Num(f64),
}

impl From<NaiveDate> for Coord {
    fn from(d: NaiveDate) -> Self {
        Coord::Date(d)
    }
}

impl From<f64> for Coord {
    fn from(v: f64) -> Self {
        Coord::Num(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing figure")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing figure")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Line {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            dash: None,
        }
    }

    pub fn dashed(color: &str, dash: &str) -> Self {
        Self {
            color: color.to_string(),
            dash: Some(dash.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

/// A `scatter` trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<Coord>,
    pub y: Vec<f64>,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    pub fn scatter(x: Vec<Coord>, y: Vec<f64>, mode: Mode) -> Self {
        Self {
            kind: "scatter",
            x,
            y,
            mode,
            name: None,
            line: None,
            marker: None,
            showlegend: None,
            xaxis: None,
            yaxis: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    pub fn marker(mut self, color: &str) -> Self {
        self.marker = Some(Marker {
            color: color.to_string(),
        });
        self
    }

    /// Place the trace on subplot axes, e.g. `("x2", "y2")`.
    pub fn on_axes(mut self, x: &str, y: &str) -> Self {
        self.xaxis = Some(x.to_string());
        self.yaxis = Some(y.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: Coord,
    pub y0: Coord,
    pub x1: Coord,
    pub y1: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    pub line: Line,
}

impl Shape {
    /// Vertical segment at `x` from `y0` to `y1` in data coordinates.
    pub fn vertical(x: Coord, y0: f64, y1: f64, line: Line) -> Self {
        Self {
            kind: "line",
            x0: x,
            y0: Coord::Num(y0),
            x1: x,
            y1: Coord::Num(y1),
            xref: None,
            yref: None,
            line,
        }
    }

    /// Full-height vertical line on the subplot whose axes are `xref`/`yref`.
    pub fn vline(x: Coord, xref: &str, yref: &str, line: Line) -> Self {
        Self {
            kind: "line",
            x0: x,
            y0: Coord::Num(0.0),
            x1: x,
            y1: Coord::Num(1.0),
            xref: Some(xref.to_string()),
            yref: Some(format!("{} domain", yref)),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: Coord,
    pub y: Coord,
    pub text: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textangle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderwidth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderpad: Option<u32>,
}

impl Annotation {
    pub fn text(x: Coord, y: Coord, text: &str) -> Self {
        Self {
            x,
            y,
            text: text.to_string(),
            showarrow: false,
            xref: None,
            yref: None,
            font: None,
            textangle: None,
            align: None,
            bordercolor: None,
            borderwidth: None,
            borderpad: None,
        }
    }

    pub fn refs(mut self, xref: &str, yref: &str) -> Self {
        self.xref = Some(xref.to_string());
        self.yref = Some(yref.to_string());
        self
    }

    pub fn font(mut self, color: &str, size: u32) -> Self {
        self.font = Some(Font {
            color: color.to_string(),
            size,
        });
        self
    }

    pub fn arrow(mut self) -> Self {
        self.showarrow = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Title {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            xref: None,
            x: None,
        }
    }

    /// Left-aligned to the plotting paper, like a report heading.
    pub fn heading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            xref: Some("paper"),
            x: Some(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub margin: Margin,
    pub plot_bgcolor: &'static str,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}
