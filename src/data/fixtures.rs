//! In-memory tables shared by the unit tests.

use super::model::{Row, Table};

/// A row whose every indicator column holds `value`.
pub fn row(country: &str, year: i32, value: f64) -> Row {
    Row {
        country: country.to_string(),
        year,
        life_expectancy_men: Some(value),
        life_expectancy_women: Some(value + 10.0),
        infant_deaths: Some(value / 10.0),
        alcohol: Some(value / 20.0),
    }
}

/// Russian Federation 2000–2005 with rising values, Germany 2001–2003 and
/// Brazil 2000–2002 with a gap in its alcohol column.
pub fn sample_table() -> Table {
    let mut rows = Vec::new();
    for (i, year) in (2000..=2005).enumerate() {
        rows.push(row("Russian Federation", year, 58.0 + i as f64));
    }
    for (i, year) in (2001..=2003).enumerate() {
        rows.push(row("Germany", year, 75.0 + i as f64));
    }
    for (i, year) in (2000..=2002).enumerate() {
        let mut r = row("Brazil", year, 68.0 + i as f64);
        if year == 2001 {
            r.alcohol = None;
        }
        rows.push(r);
    }
    Table::from_rows(rows).expect("fixture rows are non-empty")
}
