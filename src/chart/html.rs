// src/chart/html.rs

use anyhow::Result;

use super::Figure;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A standalone page that draws `figure` full-window with plotly.js.
pub fn render_page(title: &str, figure: &Figure) -> Result<String> {
    // `</` inside a <script> block would end it early
    let json = figure.to_json()?.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>html, body, #chart {{ width: 100%; height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="chart"></div>
<script>
const figure = {json};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = escape_text(title),
        cdn = PLOTLY_CDN,
        json = json,
    ))
}
