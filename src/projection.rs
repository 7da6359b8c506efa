//! Pure transforms from table rows to renderer-agnostic chart data.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::data::model::{Indicator, Row, Table};

pub const LINE_TITLE: &str = "Indicator values by country";
pub const MAP_TITLE: &str = "Indicators by country";

// ---------------------------------------------------------------------------
// ChartData – bar / line output
// ---------------------------------------------------------------------------

/// What a point is grouped and coloured by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeriesKey {
    Country(String),
    /// The point's own indicator value.
    Value(f64),
    Missing,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Country(c) => write!(f, "{c}"),
            SeriesKey::Value(v) => write!(f, "{v}"),
            SeriesKey::Missing => write!(f, "<no value>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Year.
    pub x: i32,
    pub y: Option<f64>,
    pub series: SeriesKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub markers: bool,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    fn new(indicator: Indicator) -> Self {
        Self {
            title: None,
            x_label: "Year".to_string(),
            y_label: indicator.label().to_string(),
            markers: false,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points grouped by series key, groups in first-seen order.
    pub fn series(&self) -> Vec<(&SeriesKey, Vec<&ChartPoint>)> {
        let mut groups: Vec<(&SeriesKey, Vec<&ChartPoint>)> = Vec::new();
        for point in &self.points {
            match groups.iter().position(|(key, _)| *key == &point.series) {
                Some(i) => groups[i].1.push(point),
                None => groups.push((&point.series, vec![point])),
            }
        }
        groups
    }
}

/// One bar per row at its year, keyed by the row's own value.
pub fn bar_projection(rows: &[&Row], indicator: Indicator) -> ChartData {
    let mut chart = ChartData::new(indicator);
    chart.points = rows
        .iter()
        .map(|row| {
            let y = row.value(indicator);
            ChartPoint {
                x: row.year,
                y,
                series: y.map_or(SeriesKey::Missing, SeriesKey::Value),
            }
        })
        .collect();
    chart
}

/// One marker line per country; points inside a series sorted by year.
pub fn line_projection(rows: &[&Row], indicator: Indicator) -> ChartData {
    let mut chart = ChartData::new(indicator);
    chart.title = Some(LINE_TITLE.to_string());
    chart.markers = true;

    let mut order: Vec<&str> = Vec::new();
    for row in rows {
        if !order.contains(&row.country.as_str()) {
            order.push(&row.country);
        }
    }

    for country in order {
        let mut members: Vec<&Row> = rows
            .iter()
            .copied()
            .filter(|r| r.country == country)
            .collect();
        members.sort_by_key(|r| r.year);
        chart.points.extend(members.into_iter().map(|r| ChartPoint {
            x: r.year,
            y: r.value(indicator),
            series: SeriesKey::Country(country.to_string()),
        }));
    }
    chart
}

// ---------------------------------------------------------------------------
// AnimatedChartData – map output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub country: String,
    pub value: Option<f64>,
}

/// Every country's value for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFrame {
    pub year: i32,
    pub entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimatedChartData {
    pub indicator: Indicator,
    pub title: String,
    pub frames: Vec<MapFrame>,
}

impl AnimatedChartData {
    /// `(min, max)` over every present value in every frame, so one colour
    /// scale serves the whole animation.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.frames
            .iter()
            .flat_map(|f| f.entries.iter())
            .filter_map(|e| e.value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn frame(&self, index: usize) -> Option<&MapFrame> {
        self.frames.get(index)
    }
}

/// Full-table projection with `Year` as the animation dimension.
///
/// Ignores any country or cutoff selection. A duplicated (country, year)
/// keeps its first row.
pub fn map_projection(table: &Table, indicator: Indicator) -> AnimatedChartData {
    let frames = table
        .distinct_years()
        .iter()
        .map(|&year| {
            let mut seen: HashSet<&str> = HashSet::new();
            let entries = table
                .rows()
                .iter()
                .filter(|r| r.year == year && seen.insert(r.country.as_str()))
                .map(|r| MapEntry {
                    country: r.country.clone(),
                    value: r.value(indicator),
                })
                .collect();
            MapFrame { year, entries }
        })
        .collect();

    AnimatedChartData {
        indicator,
        title: MAP_TITLE.to_string(),
        frames,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::data::filter::filter;
    use crate::data::fixtures::{row, sample_table};

    fn countries(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_gives_empty_charts() {
        for indicator in Indicator::ALL {
            assert!(bar_projection(&[], indicator).is_empty());
            assert!(line_projection(&[], indicator).is_empty());
        }
    }

    #[test]
    fn bar_is_keyed_by_its_own_value() {
        let table = sample_table();
        let rows = filter(&table, &countries(&["Russian Federation"]), 2003);
        let chart = bar_projection(&rows, Indicator::LifeExpectancyMen);

        assert_eq!(chart.points.len(), 4);
        for (point, expected) in chart.points.iter().zip([58.0, 59.0, 60.0, 61.0]) {
            assert_eq!(point.y, Some(expected));
            assert_eq!(point.series, SeriesKey::Value(expected));
        }
        assert_eq!(
            chart.points.iter().map(|p| p.x).collect::<Vec<_>>(),
            [2000, 2001, 2002, 2003]
        );
        assert!(!chart.markers);
        assert_eq!(chart.y_label, "Life expectancy (men)");
    }

    #[test]
    fn bar_marks_missing_values() {
        let table = sample_table();
        let rows = filter(&table, &countries(&["Brazil"]), 2005);
        let chart = bar_projection(&rows, Indicator::Alcohol);
        assert_eq!(chart.points[1].y, None);
        assert_eq!(chart.points[1].series, SeriesKey::Missing);
    }

    #[test]
    fn line_series_are_sorted_by_year() {
        let table = Table::from_rows(vec![
            row("Germany", 2003, 77.0),
            row("Chad", 2001, 47.0),
            row("Germany", 2001, 75.0),
            row("Chad", 2000, 46.0),
            row("Germany", 2002, 76.0),
        ])
        .unwrap();
        let rows = filter(&table, &countries(&["Germany", "Chad"]), 2010);
        let chart = line_projection(&rows, Indicator::LifeExpectancyMen);

        assert!(chart.markers);
        assert_eq!(chart.title.as_deref(), Some(LINE_TITLE));

        let series = chart.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, &SeriesKey::Country("Germany".into()));
        assert_eq!(series[1].0, &SeriesKey::Country("Chad".into()));
        for (_, points) in &series {
            assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
        }
        assert_eq!(
            series[0].1.iter().map(|p| p.y).collect::<Vec<_>>(),
            [Some(75.0), Some(76.0), Some(77.0)]
        );
    }

    #[test]
    fn map_has_a_frame_per_year_and_an_entry_per_country() {
        let table = sample_table();
        let map = map_projection(&table, Indicator::InfantDeaths);

        let years: Vec<i32> = map.frames.iter().map(|f| f.year).collect();
        assert_eq!(years, table.distinct_years());

        for frame in &map.frames {
            let expected: HashSet<&str> = table
                .rows()
                .iter()
                .filter(|r| r.year == frame.year)
                .map(|r| r.country.as_str())
                .collect();
            let got: Vec<&str> = frame.entries.iter().map(|e| e.country.as_str()).collect();
            assert_eq!(got.len(), expected.len());
            assert_eq!(got.iter().copied().collect::<HashSet<_>>(), expected);
        }

        assert_eq!(map.frames[0].entries.len(), 2);
        assert_eq!(map.frames[1].entries.len(), 3);
        assert_eq!(map.frames[5].entries.len(), 1);
    }

    #[test]
    fn map_passes_missing_values_through() {
        let table = sample_table();
        let map = map_projection(&table, Indicator::Alcohol);
        let frame_2001 = map.frames.iter().find(|f| f.year == 2001).unwrap();
        let brazil = frame_2001
            .entries
            .iter()
            .find(|e| e.country == "Brazil")
            .unwrap();
        assert_eq!(brazil.value, None);
    }

    #[test]
    fn map_keeps_first_row_of_a_duplicate_pair() {
        let table = Table::from_rows(vec![row("Chad", 2000, 46.0), row("Chad", 2000, 99.0)]).unwrap();
        let map = map_projection(&table, Indicator::LifeExpectancyMen);
        assert_eq!(map.frames[0].entries.len(), 1);
        assert_eq!(map.frames[0].entries[0].value, Some(46.0));
    }

    #[test]
    fn value_range_spans_all_frames() {
        let table = sample_table();
        let map = map_projection(&table, Indicator::LifeExpectancyMen);
        assert_eq!(map.value_range(), Some((58.0, 77.0)));
    }

    #[test]
    fn projections_are_deterministic() {
        let table = sample_table();
        let rows = filter(&table, &countries(&["Germany", "Brazil"]), 2004);
        for indicator in Indicator::ALL {
            assert_eq!(bar_projection(&rows, indicator), bar_projection(&rows, indicator));
            assert_eq!(line_projection(&rows, indicator), line_projection(&rows, indicator));
            assert_eq!(map_projection(&table, indicator), map_projection(&table, indicator));
        }
    }
}
