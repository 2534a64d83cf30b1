use crate::types::{CountryRow, PopulationPoint, PopulationSeries};
use tracing::debug;

/// Inclusive range of years sampled every `step` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
    pub step: usize,
}

impl YearRange {
    /// Even years 1960 through 2022.
    pub const STANDARD: YearRange = YearRange { first: 1960, last: 2022, step: 2 };

    pub fn years(&self) -> impl Iterator<Item = i32> {
        (self.first..=self.last).step_by(self.step.max(1))
    }

    pub fn len(&self) -> usize {
        self.years().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::STANDARD
    }
}

pub fn build_series(row: &CountryRow, range: &YearRange) -> PopulationSeries {
    range
        .years()
        .map(|year| PopulationPoint {
            year,
            population: row.cells.get(&year).and_then(|cell| parse_cell(&row.country_code, year, cell)),
        })
        .collect()
}

fn parse_cell(code: &str, year: i32, cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!("Unreadable population '{}' for {} in {}", cell, code, year);
            None
        }
    }
}
