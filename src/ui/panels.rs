use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Indicator;
use crate::state::AppState;

const HEADER_FILL: Color32 = Color32::from_rgb(140, 130, 188);

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Title strip with a one-line dataset summary.
pub fn header(ui: &mut Ui, state: &AppState) {
    egui::Frame::new()
        .fill(HEADER_FILL)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("World country indicators").color(Color32::WHITE));
            let table = state.table();
            ui.label(
                RichText::new(format!(
                    "Mortality and consumption indicators for {} countries, {}–{}.",
                    table.distinct_countries().len(),
                    table.year_min(),
                    table.year_max()
                ))
                .color(Color32::WHITE),
            );
        });
}

// ---------------------------------------------------------------------------
// Year cutoff
// ---------------------------------------------------------------------------

/// Slider over the distinct years of the table.
pub fn year_slider(ui: &mut Ui, state: &mut AppState) {
    let years = state.table().distinct_years().to_vec();
    let cutoff = state.selection().year_cutoff;
    let mut index = years.iter().rposition(|&y| y <= cutoff).unwrap_or(0);

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Up to year");
        ui.spacing_mut().slider_width = (ui.available_width() - 80.0).max(120.0);
        ui.add(
            egui::Slider::new(&mut index, 0..=years.len() - 1)
                .custom_formatter(|v, _| {
                    years
                        .get(v.round() as usize)
                        .map_or_else(String::new, |y| y.to_string())
                })
                .custom_parser(|s| {
                    years
                        .iter()
                        .position(|y| y.to_string() == s.trim())
                        .map(|i| i as f64)
                }),
        );
    });

    if let Some(&year) = years.get(index) {
        state.set_year_cutoff(year);
    }
}

// ---------------------------------------------------------------------------
// Left side panel – country and indicator selectors
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Indicator");
    ui.separator();

    let mut indicator = state.selection().indicator;
    for option in Indicator::ALL {
        ui.radio_value(&mut indicator, option, option.label());
    }
    state.set_indicator(indicator);

    ui.add_space(8.0);
    ui.heading("Countries");
    ui.separator();

    ui.add(egui::TextEdit::singleline(&mut state.country_query).hint_text("Search…"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
        ui.label(format!(
            "{}/{} selected",
            state.selection().countries.len(),
            state.table().distinct_countries().len()
        ));
    });

    // Clone what we need so we can mutate state after the loop.
    let countries: Vec<String> = state.visible_countries().into_iter().cloned().collect();
    let mut toggled: Vec<String> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &countries {
                let mut checked = state.selection().countries.contains(country);
                let text = RichText::new(country).color(state.series_colors.color_for(country));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled.push(country.clone());
                }
            }
        });

    for country in toggled {
        state.toggle_country(&country);
    }
}
