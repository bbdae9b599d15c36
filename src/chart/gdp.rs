// src/chart/gdp.rs

use super::{
    Annotation, Axis, Coord, Figure, Layout, Line, Margin, Mode, Shape, Title, Trace, BLUE, RED,
    TRANSPARENT,
};
use crate::process::{AnnotatedGdp, CauseAggregate};

const TITLE: &str = "<b>Covid-19: An economic shock like no other</b><br><br><sup>\
UK post-war recessions as shown by periods of negative GDP growth compared to the \
period during the Covid-19 pandemic</sup>";

/// Vertical offsets (in % GDP units) for one cause label and its connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelOffsets {
    pub label: f64,
    pub line_start: f64,
    pub line_end: f64,
}

/// Even rows hang below their point, odd rows sit above, so neighbours
/// along the time axis do not collide.
pub fn label_offsets(index: usize) -> LabelOffsets {
    let sign = if index % 2 == 0 { -1.0 } else { 1.0 };
    LabelOffsets {
        label: 8.0 * sign,
        line_start: 1.0 * sign,
        line_end: 7.0 * sign,
    }
}

/// Quarterly GDP growth with recession quarters marked and one label per cause.
pub fn gdp_chart(gdp: &[AnnotatedGdp], causes: &[CauseAggregate]) -> Figure {
    let growth = Trace::scatter(
        gdp.iter().map(|r| Coord::Date(r.start)).collect(),
        gdp.iter().map(|r| r.growth_pct).collect(),
        Mode::Lines,
    )
    .named("% Quarterly GDP Change")
    .line(Line::solid(BLUE));

    let marked: Vec<&AnnotatedGdp> = gdp.iter().filter(|r| r.recession.is_some()).collect();
    let recessions = Trace::scatter(
        marked.iter().map(|r| Coord::Date(r.start)).collect(),
        marked.iter().map(|r| r.growth_pct).collect(),
        Mode::Markers,
    )
    .named("UK Recessions")
    .marker(RED);

    let mut shapes = Vec::with_capacity(causes.len());
    let mut annotations = Vec::with_capacity(causes.len());
    for (i, agg) in causes.iter().enumerate() {
        let off = label_offsets(i);
        let x = Coord::Date(agg.mean_period);
        let y = agg.peak_decline;

        shapes.push(Shape::vertical(
            x,
            y + off.line_start,
            y + off.line_end,
            Line::dashed("black", "dot"),
        ));

        let mut label = Annotation::text(x, Coord::Num(y + off.label), &agg.cause).font("black", 10);
        label.textangle = Some(0.0);
        annotations.push(label);
    }

    Figure {
        data: vec![growth, recessions],
        layout: Layout {
            title: Title::heading(TITLE),
            margin: Margin {
                t: Some(100),
                b: Some(100),
                r: None,
            },
            plot_bgcolor: TRANSPARENT,
            xaxis: Axis {
                title: Some(Title::plain("Year")),
                ..Axis::default()
            },
            yaxis: Axis {
                title: Some(Title::plain("% GDP Change")),
                ..Axis::default()
            },
            xaxis2: None,
            yaxis2: None,
            shapes,
            annotations,
        },
    }
}
