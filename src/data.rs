use crate::error::DataLoadError;
use crate::types::{CountryRow, PopulationTable};
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const NAME_COLUMN: &str = "Country Name";
pub const CODE_COLUMN: &str = "Country Code";

pub fn load_table(path: &Path) -> Result<PopulationTable, DataLoadError> {
    info!("Loading population table from {:?}", path);
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_table(file, path)?;
    if table.is_empty() {
        warn!("No countries found in {:?}", path);
    }
    info!("Loaded {} countries", table.len());
    Ok(table)
}

/// Parses a wide-format table from any reader; `path` is only used in errors.
pub fn read_table<R: Read>(reader: R, path: &Path) -> Result<PopulationTable, DataLoadError> {
    let csv_err = |source| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    let find = |column: &str| {
        headers.iter().position(|h| h.trim() == column).ok_or_else(|| {
            DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            }
        })
    };
    let name_idx = find(NAME_COLUMN)?;
    let code_idx = find(CODE_COLUMN)?;

    // Any other header that reads as an integer is a year column
    let year_columns: Vec<(usize, i32)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != name_idx && *i != code_idx)
        .filter_map(|(i, h)| h.trim().parse::<i32>().ok().map(|year| (i, year)))
        .collect();
    info!("Found {} year columns", year_columns.len());

    let mut rows = Vec::new();
    let mut seen_codes = HashSet::new();

    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let country_name = record.get(name_idx).unwrap_or("").to_string();

        if country_name.is_empty() { continue; }

        let country_code = record.get(code_idx).unwrap_or("").to_string();
        if !seen_codes.insert(country_code.clone()) {
            warn!("Duplicate country code '{}' for '{}'", country_code, country_name);
        }

        let cells: BTreeMap<i32, String> = year_columns
            .iter()
            .map(|&(idx, year)| (year, record.get(idx).unwrap_or("").to_string()))
            .collect();

        rows.push(CountryRow {
            country_name,
            country_code,
            cells,
        });
    }

    Ok(PopulationTable { rows })
}
