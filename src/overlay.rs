use crate::types::{HighlightColor, MapOverlayRow, PopulationTable};

pub fn build_overlay(table: &PopulationTable, selected: &str) -> Vec<MapOverlayRow> {
    table
        .rows
        .iter()
        .map(|row| {
            let is_selected = row.country_name == selected;
            MapOverlayRow {
                country_code: row.country_code.clone(),
                country_name: row.country_name.clone(),
                is_selected,
                color: if is_selected { HighlightColor::Selected } else { HighlightColor::Unselected },
            }
        })
        .collect()
}
