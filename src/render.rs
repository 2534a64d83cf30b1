use crate::types::{HighlightColor, MapOverlayRow, PopulationSeries};
use serde_json::{json, Value};

pub const PAGE_TITLE: &str = "Europe Migration Dashboard";
const TREND_HEIGHT: u32 = 450;
const MAP_HEIGHT: u32 = 670;

/// Plotly figure for the population line chart.
pub fn trend_figure(country_name: &str, series: &PopulationSeries) -> Value {
    // Years go out as strings so the axis is categorical
    let years: Vec<String> = series.iter().map(|p| p.year.to_string()).collect();
    let populations: Vec<Option<f64>> = series.iter().map(|p| p.population).collect();

    json!({
        "data": [{
            "type": "scatter",
            "x": years,
            "y": populations,
            "mode": "lines+markers",
            "name": "Population",
        }],
        "layout": {
            "title": { "text": format!("Population Trend for {}", country_name) },
            "xaxis": { "title": { "text": "Year" }, "tickmode": "linear", "tickangle": -45 },
            "yaxis": { "title": { "text": "Population" } },
            "template": "plotly_white",
            "plot_bgcolor": "rgba(0, 0, 0, 0)",
            "paper_bgcolor": "rgba(0, 0, 0, 0)",
            "height": TREND_HEIGHT,
        }
    })
}

/// Plotly choropleth with the selected country highlighted.
pub fn map_figure(overlay: &[MapOverlayRow]) -> Value {
    let locations: Vec<&str> = overlay.iter().map(|r| r.country_code.as_str()).collect();
    let names: Vec<&str> = overlay.iter().map(|r| r.country_name.as_str()).collect();
    let z: Vec<u8> = overlay.iter().map(|r| u8::from(r.is_selected)).collect();

    json!({
        "data": [{
            "type": "choropleth",
            "locationmode": "ISO-3",
            "locations": locations,
            "z": z,
            "zmin": 0,
            "zmax": 1,
            "colorscale": [
                [0, HighlightColor::Unselected.css()],
                [1, HighlightColor::Selected.css()],
            ],
            "showscale": false,
            "text": names,
            "hoverinfo": "text",
        }],
        "layout": {
            "template": "plotly_dark",
            "showlegend": false,
            "height": MAP_HEIGHT,
            "paper_bgcolor": "#111111",
            "geo": { "bgcolor": "rgba(0, 0, 0, 0)" },
        }
    })
}

/// The single dashboard page. Charts are drawn client-side from the JSON API.
pub fn dashboard_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>{css}</style>
</head>
<body>
    <div class="columns">
        <div class="left">
            <label for="country">Select a country</label>
            <select id="country"></select>
            <h3 id="summary-title"></h3>
            <p id="summary-total"></p>
            <p id="summary-growth"></p>
            <div id="trend"></div>
        </div>
        <div class="right">
            <div class="map-heading">
                <h2>World Map</h2>
                <hr>
            </div>
            <div id="map"></div>
        </div>
    </div>
    <button id="narrate">Click me to learn something about the country</button>
    <div id="narrative"></div>
    <script>{js}</script>
</body>
</html>"#,
        title = PAGE_TITLE,
        css = inline_css(),
        js = inline_javascript(),
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: sans-serif; margin: 2rem; }
.columns { display: flex; gap: 3rem; align-items: flex-start; }
.left { flex: 0.8; }
.right { flex: 1; }
.map-heading { text-align: center; }
.map-heading hr { border: 1px solid; width: 80%; margin: auto;
    border-image: linear-gradient(to right, red, orange, yellow, green, blue, indigo, violet) 1; }
#narrative { white-space: pre-wrap; margin-top: 1rem; }
.error { color: #b00020; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
const select = document.getElementById('country');
const narrative = document.getElementById('narrative');

async function getJson(url, options) {
    const res = await fetch(url, options);
    const body = await res.json();
    if (!res.ok) { throw body; }
    return body;
}

async function refresh() {
    const country = encodeURIComponent(select.value);
    narrative.textContent = '';
    const trend = await getJson(`/api/trend?country=${country}`);
    document.getElementById('summary-title').textContent = `Summary Statistics for ${trend.country}`;
    document.getElementById('summary-total').textContent = trend.summary_text[0];
    document.getElementById('summary-growth').textContent = trend.summary_text[1];
    Plotly.react('trend', trend.figure.data, trend.figure.layout, {responsive: true});
    const map = await getJson(`/api/map?country=${country}`);
    Plotly.react('map', map.figure.data, map.figure.layout);
}

document.getElementById('narrate').addEventListener('click', async () => {
    narrative.className = '';
    narrative.textContent = '...';
    try {
        const res = await getJson('/api/narrative', {
            method: 'POST',
            headers: {'Content-Type': 'application/json'},
            body: JSON.stringify({country: select.value}),
        });
        narrative.textContent = res.text;
    } catch (err) {
        narrative.className = 'error';
        narrative.textContent = err.status
            ? `Request failed with status code: ${err.status}\n${err.body}`
            : (err.error || 'Request failed');
    }
});

select.addEventListener('change', refresh);

getJson('/api/countries').then(({countries}) => {
    for (const name of countries) {
        const opt = document.createElement('option');
        opt.value = name;
        opt.textContent = name;
        select.appendChild(opt);
    }
    refresh();
});
"#
}
