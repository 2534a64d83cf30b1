use crate::error::CountryNotFound;
use crate::types::{CountryRow, PopulationTable};
use std::collections::HashSet;

/// First row whose country name equals `name` exactly.
pub fn select<'a>(table: &'a PopulationTable, name: &str) -> Result<&'a CountryRow, CountryNotFound> {
    table
        .rows
        .iter()
        .find(|row| row.country_name == name)
        .ok_or_else(|| CountryNotFound { name: name.to_string() })
}

/// Distinct country names in table order.
pub fn country_names(table: &PopulationTable) -> Vec<&str> {
    let mut seen = HashSet::new();
    table
        .rows
        .iter()
        .map(|row| row.country_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn row(name: &str, code: &str) -> CountryRow {
        CountryRow {
            country_name: name.to_string(),
            country_code: code.to_string(),
            cells: BTreeMap::new(),
        }
    }

    fn table() -> PopulationTable {
        PopulationTable {
            rows: vec![row("Czechia", "CZE"), row("Austria", "AUT"), row("Czechia", "XCZ")],
        }
    }

    #[test]
    fn picks_first_exact_match() {
        let table = table();
        assert_eq!(select(&table, "Czechia").unwrap().country_code, "CZE");
        assert_eq!(select(&table, "Austria").unwrap().country_code, "AUT");
    }

    #[test]
    fn match_is_case_sensitive() {
        let table = table();
        let err = select(&table, "czechia").unwrap_err();
        assert_eq!(err, CountryNotFound { name: "czechia".into() });
    }

    #[test]
    fn absent_country_is_not_found() {
        assert!(select(&table(), "Atlantis").is_err());
        assert!(select(&PopulationTable::default(), "Austria").is_err());
    }

    #[test]
    fn names_are_distinct_and_ordered() {
        assert_eq!(country_names(&table()), ["Czechia", "Austria"]);
    }
}
