// src/fetch/table.rs

use anyhow::{anyhow, Result};
use scraper::{node::Node, ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::process::{raw_table::RawTable, utils::collapse_whitespace};

/// Visible text of a cell. `<br>` counts as whitespace so stacked dates stay apart.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.name() == "br" => out.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// A cell carried down into later rows by `rowspan`.
#[derive(Clone)]
struct Pending {
    text: String,
    rows_left: usize,
}

/// Emit carried-down cells from `col` onwards until a free slot is reached.
fn drain_pending(pending: &mut [Option<Pending>], col: &mut usize, out: &mut Vec<String>) {
    while let Some(Some(p)) = pending.get_mut(*col) {
        out.push(p.text.clone());
        p.rows_left -= 1;
        if p.rows_left == 0 {
            pending[*col] = None;
        }
        *col += 1;
    }
}

/// Expand the rows of `table` into a rectangular-ish grid, copying
/// `rowspan`/`colspan` cells into every slot they cover.
fn expand_rows(table: ElementRef<'_>) -> Vec<Vec<String>> {
    let tr = Selector::parse("tr").expect("tr selector should parse");
    let mut pending: Vec<Option<Pending>> = Vec::new();
    let mut grid = Vec::new();

    for row in table.select(&tr) {
        let mut out: Vec<String> = Vec::new();
        let mut col = 0usize;

        let cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|c| matches!(c.value().name(), "td" | "th"));

        for cell in cells {
            drain_pending(&mut pending, &mut col, &mut out);

            let text = cell_text(cell);
            let rowspan = span_attr(cell, "rowspan");
            let colspan = span_attr(cell, "colspan");
            for _ in 0..colspan {
                if rowspan > 1 {
                    if pending.len() <= col {
                        pending.resize(col + 1, None);
                    }
                    pending[col] = Some(Pending {
                        text: text.clone(),
                        rows_left: rowspan - 1,
                    });
                }
                out.push(text.clone());
                col += 1;
            }
        }
        drain_pending(&mut pending, &mut col, &mut out);

        trace!(cells = out.len(), "expanded table row");
        grid.push(out);
    }
    grid
}

/// Find the first `<table>` carrying `class` and read it into a [`RawTable`].
/// The first row becomes the header; all-empty body rows are dropped.
pub fn parse_table(html: &str, class: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("table").expect("table selector should parse");

    let table = document
        .select(&selector)
        .find(|t| t.value().classes().any(|c| c == class))
        .ok_or_else(|| anyhow!("no <table> with class {:?} found", class))?;

    let mut grid = expand_rows(table).into_iter();
    let headers = grid
        .next()
        .ok_or_else(|| anyhow!("table with class {:?} has no rows", class))?;
    let rows: Vec<Vec<String>> = grid
        .filter(|r| r.iter().any(|c| !c.is_empty()))
        .collect();

    debug!(columns = headers.len(), rows = rows.len(), "parsed table");
    Ok(RawTable { headers, rows })
}
