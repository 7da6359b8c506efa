use std::collections::BTreeSet;

use super::model::{Indicator, Row, Table};
use crate::error::InvalidSelectionError;

// ---------------------------------------------------------------------------
// Selection state driving the charts
// ---------------------------------------------------------------------------

pub const DEFAULT_COUNTRY: &str = "Russian Federation";
pub const DEFAULT_YEAR_CUTOFF: i32 = 2000;

/// The user's current choices. An empty `countries` set is valid and
/// simply selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub indicator: Indicator,
    pub year_cutoff: i32,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            countries: BTreeSet::from([DEFAULT_COUNTRY.to_string()]),
            indicator: Indicator::default(),
            year_cutoff: DEFAULT_YEAR_CUTOFF,
        }
    }
}

impl FilterSelection {
    /// Report the first problem with this selection against `table`.
    pub fn check(&self, table: &Table) -> Result<(), InvalidSelectionError> {
        let (min, max) = (table.year_min(), table.year_max());
        if self.year_cutoff < min || self.year_cutoff > max {
            return Err(InvalidSelectionError::YearOutOfRange {
                year: self.year_cutoff,
                min,
                max,
            });
        }

        let unknown: Vec<String> = self
            .countries
            .iter()
            .filter(|c| !table.has_country(c))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(InvalidSelectionError::UnknownCountries(unknown));
        }
        Ok(())
    }

    /// Clamp the year cutoff into the table's year span.
    ///
    /// Unknown countries are kept: they match no rows.
    pub fn clamped(mut self, table: &Table) -> Self {
        if let Err(e) = self.check(table) {
            log::warn!("Adjusting selection: {e}");
        }
        self.year_cutoff = clamp_year(table, self.year_cutoff);
        self
    }
}

/// Nearest valid cutoff within `[year_min, year_max]`.
pub fn clamp_year(table: &Table, year: i32) -> i32 {
    year.clamp(table.year_min(), table.year_max())
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

/// Rows of the selected countries up to and including `year_cutoff`,
/// in table order.
///
/// A row passes when:
/// * its year is `<= year_cutoff`, and
/// * its country is in `countries` (an empty set lets nothing through)
pub fn filter<'a>(table: &'a Table, countries: &BTreeSet<String>, year_cutoff: i32) -> Vec<&'a Row> {
    if countries.is_empty() {
        return Vec::new();
    }
    table
        .rows()
        .iter()
        .filter(|row| row.year <= year_cutoff && countries.contains(&row.country))
        .collect()
}
