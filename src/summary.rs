use crate::types::{PopulationSeries, SummaryStats};

/// Latest population and average growth per series point.
///
/// Growth divides by the number of points (32 for the standard range), not
/// by elapsed years. A missing first or last value yields no growth figure.
pub fn summarize(series: &PopulationSeries) -> SummaryStats {
    let first = series.first().and_then(|p| p.population);
    let last = series.last().and_then(|p| p.population);

    let average_growth = match (first, last) {
        (Some(first), Some(last)) => Some((last - first) / series.len() as f64),
        _ => None,
    };

    SummaryStats {
        latest_population: last,
        average_growth,
    }
}

/// Whole number with thousands separators, or `N/A`.
pub fn format_population(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// The two display lines shown under the selector.
pub fn summary_lines(stats: &SummaryStats, latest_year: i32) -> [String; 2] {
    [
        format!("Total population in {}: {}", latest_year, format_population(stats.latest_population)),
        format!("Average annual growth: {}", format_population(stats.average_growth)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PopulationPoint;

    fn series(values: &[Option<f64>]) -> PopulationSeries {
        values
            .iter()
            .enumerate()
            .map(|(i, &population)| PopulationPoint { year: 1960 + 2 * i as i32, population })
            .collect()
    }

    #[test]
    fn growth_divides_by_point_count() {
        let mut values = vec![Some(100.0); 32];
        values[31] = Some(420.0);
        let stats = summarize(&series(&values));
        assert_eq!(stats.latest_population, Some(420.0));
        assert_eq!(stats.average_growth, Some(10.0));
    }

    #[test]
    fn missing_first_value_has_no_growth() {
        let mut values = vec![Some(100.0); 32];
        values[0] = None;
        values[31] = Some(500.0);
        let stats = summarize(&series(&values));
        assert_eq!(stats.latest_population, Some(500.0));
        assert_eq!(stats.average_growth, None);
    }

    #[test]
    fn missing_last_value_has_no_latest_or_growth() {
        let mut values = vec![Some(100.0); 32];
        values[31] = None;
        let stats = summarize(&series(&values));
        assert_eq!(stats, SummaryStats { latest_population: None, average_growth: None });
    }

    #[test]
    fn empty_series() {
        let stats = summarize(&Vec::new());
        assert_eq!(stats, SummaryStats { latest_population: None, average_growth: None });
    }

    #[test]
    fn deterministic() {
        let s = series(&[Some(1.0), None, Some(7.5)]);
        assert_eq!(summarize(&s), summarize(&s));
    }

    #[test]
    fn formats_like_the_dashboard() {
        assert_eq!(format_population(Some(10_701_777.0)), "10,701,777");
        assert_eq!(format_population(Some(999.4)), "999");
        assert_eq!(format_population(Some(1000.0)), "1,000");
        assert_eq!(format_population(Some(-12_345.6)), "-12,346");
        assert_eq!(format_population(Some(0.0)), "0");
        assert_eq!(format_population(None), "N/A");
    }

    #[test]
    fn summary_lines_text() {
        let stats = SummaryStats { latest_population: Some(500.0), average_growth: None };
        let [total, growth] = summary_lines(&stats, 2022);
        assert_eq!(total, "Total population in 2022: 500");
        assert_eq!(growth, "Average annual growth: N/A");
    }
}
