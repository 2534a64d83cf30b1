use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the wide-format table: a country and its raw year cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country_name: String,
    pub country_code: String,
    // Year -> raw cell text, exactly as read from the CSV
    pub cells: BTreeMap<i32, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationTable {
    pub rows: Vec<CountryRow>,
}

impl PopulationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationPoint {
    pub year: i32,
    pub population: Option<f64>,
}

/// Population points in ascending year order.
pub type PopulationSeries = Vec<PopulationPoint>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub latest_population: Option<f64>,
    /// `None` when either end of the series is missing.
    pub average_growth: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Selected,
    Unselected,
}

impl HighlightColor {
    pub fn css(self) -> &'static str {
        match self {
            HighlightColor::Selected => "blue",
            HighlightColor::Unselected => "lightgrey",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlayRow {
    pub country_code: String,
    pub country_name: String,
    pub is_selected: bool,
    pub color: HighlightColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub text: String,
}
