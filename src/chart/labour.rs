// src/chart/labour.rs

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use super::{
    Annotation, Axis, Coord, Figure, Layout, Line, Margin, Mode, Shape, Title, Trace, BLUE, RED,
    TRANSPARENT,
};
use crate::{load::LabourRecord, process::max_earnings_point};

const TITLE: &str = "<b>Covid-19: Unemployment increased but, paradoxically, so did earnings</b>\
<br><br><sup>UK unemployment and change in average earnings</sup>";

const FOOTNOTE: &str = "* It appears average earnings increased,<br>\
but this is in comparison to the year before<br>\
when many workers were furloughed. Also,<br>\
predominantly lower income earners lost their<br>\
employment during the pandemic, meaning<br>\
a higher average overall.";

/// Date of the first UK lockdown announcement.
pub fn lockdown_date() -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2020, 3, 23).context("lockdown date")
}

/// Unemployment (top) and earnings change (bottom) for an already windowed
/// set of months.
pub fn labour_chart(rows: &[LabourRecord]) -> Result<Figure> {
    let Some(peak) = max_earnings_point(rows) else {
        bail!("no labour-market months left to plot");
    };
    let x: Vec<Coord> = rows.iter().map(|r| Coord::Date(r.month.start_date())).collect();

    let unemployment = Trace::scatter(
        x.clone(),
        rows.iter().map(|r| r.unemployment_pct).collect(),
        Mode::Lines,
    )
    .named("% Unemployment")
    .line(Line::solid(BLUE))
    .on_axes("x", "y");

    let earnings = Trace::scatter(
        x,
        rows.iter().map(|r| r.avg_earnings_change_pct).collect(),
        Mode::Lines,
    )
    .named("% Change in average earnings")
    .line(Line::solid(RED))
    .on_axes("x2", "y2");

    let peak_x = Coord::Date(peak.month.start_date());
    let mut peak_marker = Trace::scatter(
        vec![peak_x],
        vec![peak.avg_earnings_change_pct],
        Mode::Markers,
    )
    .marker("black")
    .on_axes("x2", "y2");
    peak_marker.showlegend = Some(false);

    let lockdown = Coord::Date(lockdown_date()?);
    let shapes = vec![
        Shape::vline(lockdown, "x", "y", Line::dashed("black", "dash")),
        Shape::vline(lockdown, "x2", "y2", Line::dashed("black", "dash")),
    ];

    let mut footnote = Annotation::text(Coord::Num(1.24), Coord::Num(0.2), FOOTNOTE)
        .refs("paper", "paper")
        .font("black", 11);
    footnote.align = Some("left");
    footnote.bordercolor = Some("#c7c7c7".to_string());
    footnote.borderwidth = Some(2);
    footnote.borderpad = Some(4);

    let annotations = vec![
        Annotation::text(Coord::Num(0.5), Coord::Num(1.02), "First UK Lockdown")
            .refs("paper", "paper"),
        Annotation::text(
            peak_x,
            Coord::Num(peak.avg_earnings_change_pct + 0.5),
            "False rebound*",
        )
        .refs("x2", "y2")
        .arrow(),
        footnote,
    ];

    Ok(Figure {
        data: vec![unemployment, earnings, peak_marker],
        layout: Layout {
            title: Title::heading(TITLE),
            margin: Margin {
                t: Some(200),
                b: None,
                r: Some(350),
            },
            plot_bgcolor: TRANSPARENT,
            xaxis: Axis {
                domain: Some([0.0, 1.0]),
                anchor: Some("y"),
                ..Axis::default()
            },
            yaxis: Axis {
                title: Some(Title::plain("%")),
                domain: Some([0.575, 1.0]),
                anchor: Some("x"),
            },
            xaxis2: Some(Axis {
                domain: Some([0.0, 1.0]),
                anchor: Some("y2"),
                ..Axis::default()
            }),
            yaxis2: Some(Axis {
                title: Some(Title::plain("% Change")),
                domain: Some([0.0, 0.425]),
                anchor: Some("x2"),
            }),
            shapes,
            annotations,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Month;

    fn rec(year: i32, month: u8, u: f64, e: f64) -> LabourRecord {
        LabourRecord {
            month: Month::new(year, month).unwrap(),
            unemployment_pct: u,
            avg_earnings_change_pct: e,
        }
    }

    #[test]
    fn two_panels_with_lockdown_lines() -> Result<()> {
        let rows = vec![
            rec(2020, 2, 4.0, 2.9),
            rec(2020, 5, 4.1, -1.2),
            rec(2021, 6, 4.8, 8.8),
        ];
        let fig = labour_chart(&rows)?;

        assert_eq!(fig.data.len(), 3);
        assert_eq!(fig.data[1].yaxis.as_deref(), Some("y2"));
        assert_eq!(fig.data[2].y, vec![8.8]);
        assert_eq!(fig.data[2].showlegend, Some(false));

        let lockdown = Coord::Date(NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
        assert_eq!(fig.layout.shapes.len(), 2);
        assert!(fig.layout.shapes.iter().all(|s| s.x0 == lockdown));

        let rebound = &fig.layout.annotations[1];
        assert_eq!(rebound.text, "False rebound*");
        assert_eq!(rebound.y, Coord::Num(8.8 + 0.5));
        assert!(rebound.showarrow);
        Ok(())
    }

    #[test]
    fn empty_window_is_an_error() {
        assert!(labour_chart(&[]).is_err());
    }
}
