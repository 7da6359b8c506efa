use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Indicator – one of the selectable numeric columns
// ---------------------------------------------------------------------------

/// The four selectable health/demographic indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum Indicator {
    #[default]
    LifeExpectancyMen,
    LifeExpectancyWomen,
    InfantDeaths,
    Alcohol,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::LifeExpectancyMen,
        Indicator::LifeExpectancyWomen,
        Indicator::InfantDeaths,
        Indicator::Alcohol,
    ];

    /// Column header in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Indicator::LifeExpectancyMen => "Life expectancy (men)",
            Indicator::LifeExpectancyWomen => "Life expectancy(women)",
            Indicator::InfantDeaths => "Infant deaths",
            Indicator::Alcohol => "Alcohol",
        }
    }

    /// Human readable label for selectors and axes.
    pub fn label(self) -> &'static str {
        match self {
            Indicator::LifeExpectancyMen => "Life expectancy (men)",
            Indicator::LifeExpectancyWomen => "Life expectancy (women)",
            Indicator::InfantDeaths => "Infant deaths",
            Indicator::Alcohol => "Alcohol consumption",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Row – one (Country, Year) record
// ---------------------------------------------------------------------------

pub const COUNTRY_COLUMN: &str = "Country";
pub const YEAR_COLUMN: &str = "Year";

/// A single record of the source table.
///
/// Empty or `NaN` indicator cells are stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Life expectancy (men)")]
    pub life_expectancy_men: Option<f64>,
    #[serde(rename = "Life expectancy(women)")]
    pub life_expectancy_women: Option<f64>,
    #[serde(rename = "Infant deaths")]
    pub infant_deaths: Option<f64>,
    #[serde(rename = "Alcohol")]
    pub alcohol: Option<f64>,
}

impl Row {
    /// Every column a source must provide.
    pub fn required_columns() -> impl Iterator<Item = &'static str> {
        [COUNTRY_COLUMN, YEAR_COLUMN]
            .into_iter()
            .chain(Indicator::ALL.iter().map(|i| i.column()))
    }

    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::LifeExpectancyMen => self.life_expectancy_men,
            Indicator::LifeExpectancyWomen => self.life_expectancy_women,
            Indicator::InfantDeaths => self.infant_deaths,
            Indicator::Alcohol => self.alcohol,
        }
    }

    /// Replace `NaN` cells with `None` so "no value" has one representation.
    fn normalized(mut self) -> Self {
        for cell in [
            &mut self.life_expectancy_men,
            &mut self.life_expectancy_women,
            &mut self.infant_deaths,
            &mut self.alcohol,
        ] {
            if cell.is_some_and(f64::is_nan) {
                *cell = None;
            }
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset with pre-computed country and year indices.
///
/// Built once at startup and shared read-only afterwards; there are no
/// mutating methods.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Row>,
    countries: Vec<String>,
    years: Vec<i32>,
}

impl Table {
    /// Build the derived views. An empty input is rejected so that
    /// `year_min`/`year_max` are always defined.
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, DataLoadError> {
        if rows.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let rows: Vec<Row> = rows.into_iter().map(Row::normalized).collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut countries = Vec::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();
        for row in &rows {
            if seen.insert(row.country.as_str()) {
                countries.push(row.country.clone());
            }
            years.insert(row.year);
        }
        let years: Vec<i32> = years.into_iter().collect();

        Ok(Table {
            rows,
            countries,
            years,
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false` for a constructed table; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Country names in first-seen order.
    pub fn distinct_countries(&self) -> &[String] {
        &self.countries
    }

    /// Years in ascending order.
    pub fn distinct_years(&self) -> &[i32] {
        &self.years
    }

    pub fn year_min(&self) -> i32 {
        self.years[0]
    }

    pub fn year_max(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::row;

    #[test]
    fn empty_table_is_rejected() {
        assert!(matches!(Table::from_rows(Vec::new()), Err(DataLoadError::Empty)));
    }

    #[test]
    fn distinct_views_follow_first_seen_and_ascending_order() {
        let table = Table::from_rows(vec![
            row("Germany", 2003, 75.0),
            row("Russian Federation", 2001, 59.0),
            row("Germany", 2000, 74.0),
            row("Brazil", 2002, 68.0),
        ])
        .unwrap();

        assert_eq!(
            table.distinct_countries(),
            ["Germany", "Russian Federation", "Brazil"]
        );
        assert_eq!(table.distinct_years(), [2000, 2001, 2002, 2003]);
        assert_eq!(table.year_min(), 2000);
        assert_eq!(table.year_max(), 2003);
        assert_eq!(table.len(), 4);
        assert!(table.has_country("Brazil"));
        assert!(!table.has_country("France"));
    }

    #[test]
    fn nan_cells_become_missing() {
        let mut r = row("Chad", 2005, 48.0);
        r.alcohol = Some(f64::NAN);
        let table = Table::from_rows(vec![r]).unwrap();
        assert_eq!(table.rows()[0].value(Indicator::Alcohol), None);
        assert_eq!(table.rows()[0].value(Indicator::LifeExpectancyMen), Some(48.0));
    }

    #[test]
    fn required_columns_cover_every_indicator() {
        let cols: Vec<&str> = Row::required_columns().collect();
        assert_eq!(cols.len(), 6);
        assert!(cols.contains(&"Life expectancy(women)"));
        assert!(cols.contains(&"Country"));
    }
}
