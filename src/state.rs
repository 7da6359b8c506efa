use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::SeriesColors;
use crate::data::filter::FilterSelection;
use crate::data::model::{Indicator, Table};
use crate::reactive::{Controller, InputChange};

/// Seconds each map frame stays on screen while playing.
pub const FRAME_SECONDS: f64 = 0.8;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Inputs, outputs and the dependency table between them.
    pub controller: Controller,

    /// One colour per country, fixed for the session.
    pub series_colors: SeriesColors,

    /// Text typed into the country search box.
    pub country_query: String,

    /// Index of the displayed map frame.
    pub map_frame: usize,

    /// Whether the map animation is running.
    pub playing: bool,

    /// UI time at which the current frame was shown.
    last_frame_at: f64,
}

impl AppState {
    pub fn new(table: Arc<Table>, defaults: FilterSelection) -> Self {
        let series_colors = SeriesColors::new(table.distinct_countries());
        Self {
            controller: Controller::new(table, defaults),
            series_colors,
            country_query: String::new(),
            map_frame: 0,
            playing: false,
            last_frame_at: 0.0,
        }
    }

    pub fn table(&self) -> &Table {
        self.controller.table()
    }

    pub fn selection(&self) -> &FilterSelection {
        self.controller.selection()
    }

    /// Toggle a single country in the multi-select.
    pub fn toggle_country(&mut self, country: &str) {
        let mut countries = self.selection().countries.clone();
        if !countries.remove(country) {
            countries.insert(country.to_string());
        }
        self.controller.apply(InputChange::Countries(countries));
    }

    /// Select every country in the table.
    pub fn select_all(&mut self) {
        let all: BTreeSet<String> = self.table().distinct_countries().iter().cloned().collect();
        self.controller.apply(InputChange::Countries(all));
    }

    /// Deselect every country.
    pub fn select_none(&mut self) {
        self.controller.apply(InputChange::Countries(BTreeSet::new()));
    }

    pub fn set_indicator(&mut self, indicator: Indicator) {
        self.controller.apply(InputChange::Indicator(indicator));
    }

    pub fn set_year_cutoff(&mut self, year: i32) {
        self.controller.apply(InputChange::YearCutoff(year));
    }

    /// Countries matching the search box, in table order.
    pub fn visible_countries(&self) -> Vec<&String> {
        let query = self.country_query.trim().to_lowercase();
        self.table()
            .distinct_countries()
            .iter()
            .filter(|c| query.is_empty() || c.to_lowercase().contains(&query))
            .collect()
    }

    fn frame_count(&self) -> usize {
        self.controller.map().map_or(0, |m| m.frames.len())
    }

    pub fn set_map_frame(&mut self, index: usize) {
        self.map_frame = index.min(self.frame_count().saturating_sub(1));
    }

    pub fn toggle_playing(&mut self, now: f64) {
        self.playing = !self.playing;
        self.last_frame_at = now;
    }

    /// Advance the animation if the current frame has been shown long
    /// enough; wraps around after the last year.
    pub fn tick(&mut self, now: f64) {
        let frames = self.frame_count();
        if !self.playing || frames == 0 {
            return;
        }
        if now - self.last_frame_at >= FRAME_SECONDS {
            self.map_frame = (self.map_frame + 1) % frames;
            self.last_frame_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_table;
    use crate::reactive::OutputId;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_table()), FilterSelection::default())
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut s = state();
        s.toggle_country("Germany");
        assert!(s.selection().countries.contains("Germany"));
        s.toggle_country("Germany");
        assert!(!s.selection().countries.contains("Germany"));
        assert_eq!(s.controller.revision(OutputId::Bar), 3);
        assert_eq!(s.controller.revision(OutputId::Map), 1);
    }

    #[test]
    fn select_all_and_none() {
        let mut s = state();
        s.set_year_cutoff(2005);
        s.select_all();
        assert_eq!(s.selection().countries.len(), 3);
        assert_eq!(s.controller.bar().unwrap().points.len(), 12);
        s.select_none();
        assert!(s.controller.line().unwrap().is_empty());
    }

    #[test]
    fn search_filters_country_list() {
        let mut s = state();
        s.country_query = "  ger ".into();
        assert_eq!(s.visible_countries(), [&"Germany".to_string()]);
        s.country_query.clear();
        assert_eq!(s.visible_countries().len(), 3);
    }

    #[test]
    fn animation_wraps_and_waits_for_frame_time() {
        let mut s = state();
        s.tick(10.0);
        assert_eq!(s.map_frame, 0, "paused");

        s.toggle_playing(0.0);
        s.tick(0.5);
        assert_eq!(s.map_frame, 0);
        s.tick(0.9);
        assert_eq!(s.map_frame, 1);

        s.set_map_frame(99);
        assert_eq!(s.map_frame, 5);
        s.tick(2.0);
        assert_eq!(s.map_frame, 0);
    }
}
