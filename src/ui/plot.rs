use std::collections::BTreeMap;

use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ValueScale;
use crate::projection::ChartData;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Stacked bars per year, each coloured by its own value.
pub fn bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(chart) = state.controller.bar() else {
        return;
    };
    chart_caption(ui, chart);

    let values: Vec<f64> = chart.points.iter().filter_map(|p| p.y).collect();
    let scale = ValueScale::new(
        values.iter().copied().fold(f64::INFINITY, f64::min),
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    // Running totals per year, split by sign.
    let mut stacked: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    let bars: Vec<Bar> = chart
        .points
        .iter()
        .filter_map(|p| {
            let y = p.y?;
            let (up, down) = stacked.entry(p.x).or_default();
            let base = if y >= 0.0 { up } else { down };
            let bar = Bar::new(f64::from(p.x), y)
                .base_offset(*base)
                .width(0.8)
                .fill(scale.color_for(Some(y)))
                .name(p.series.to_string());
            *base += y;
            Some(bar)
        })
        .collect();

    Plot::new("bar_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart.y_label.as_str(), bars));
        });
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

/// One line with markers per selected country.
pub fn line_chart(ui: &mut Ui, state: &AppState) {
    let Some(chart) = state.controller.line() else {
        return;
    };
    chart_caption(ui, chart);

    Plot::new("line_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (key, points) in chart.series() {
                let name = key.to_string();
                let color = state.series_colors.color_for(&name);
                let xy: Vec<[f64; 2]> = points
                    .iter()
                    .filter_map(|p| Some([f64::from(p.x), p.y?]))
                    .collect();

                plot_ui.line(
                    Line::new(&name, PlotPoints::from(xy.clone()))
                        .color(color)
                        .width(1.5),
                );
                if chart.markers {
                    plot_ui.points(
                        Points::new(&name, PlotPoints::from(xy))
                            .color(color)
                            .radius(3.0),
                    );
                }
            }
        });
}

fn chart_caption(ui: &mut Ui, chart: &ChartData) {
    if let Some(title) = &chart.title {
        ui.strong(title);
    } else {
        ui.strong(&chart.y_label);
    }
    if chart.is_empty() {
        ui.weak("No rows for the current selection.");
    }
}

// ---------------------------------------------------------------------------
// Animated map
// ---------------------------------------------------------------------------

/// Per-country value cells for one year, with play/pause over all years.
pub fn map_view(ui: &mut Ui, state: &mut AppState) {
    let years: Vec<i32> = match state.controller.map() {
        Some(map) => map.frames.iter().map(|f| f.year).collect(),
        None => return,
    };
    if years.is_empty() {
        return;
    }

    let now = ui.input(|i| i.time);
    let mut frame_index = state.map_frame;
    ui.horizontal(|ui: &mut Ui| {
        let label = if state.playing { "⏸ Pause" } else { "▶ Play" };
        if ui.button(label).clicked() {
            state.toggle_playing(now);
        }
        ui.add(
            egui::Slider::new(&mut frame_index, 0..=years.len() - 1)
                .custom_formatter(|v, _| {
                    years
                        .get(v.round() as usize)
                        .map_or_else(String::new, |y| y.to_string())
                }),
        );
    });
    state.set_map_frame(frame_index);

    let Some(map) = state.controller.map() else {
        return;
    };
    let Some(frame) = map.frame(state.map_frame) else {
        return;
    };
    let scale = map
        .value_range()
        .map_or(ValueScale::new(0.0, 1.0), |(lo, hi)| ValueScale::new(lo, hi));

    ui.strong(format!("{} – {} ({})", map.title, map.indicator.label(), frame.year));

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(220.0).resizable(true))
        .column(Column::initial(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Country");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
            header.col(|ui| {
                ui.strong("");
            });
        })
        .body(|body| {
            body.rows(18.0, frame.entries.len(), |mut row| {
                let entry = &frame.entries[row.index()];
                row.col(|ui| {
                    ui.label(&entry.country);
                });
                row.col(|ui| {
                    ui.label(entry.value.map_or_else(|| "–".to_string(), |v| format!("{v:.2}")));
                });
                row.col(|ui| {
                    let fraction = entry.value.map_or(1.0, |v| scale.position(v).max(0.03));
                    let size = egui::vec2(ui.available_width() * fraction, 12.0);
                    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                    let fill = scale.color_for(entry.value);
                    ui.painter().rect_filled(rect, 2.0, fill);
                    if entry.value.is_none() {
                        ui.painter().rect_stroke(
                            rect,
                            2.0,
                            egui::Stroke::new(1.0, Color32::DARK_GRAY),
                            egui::StrokeKind::Inside,
                        );
                    }
                });
            });
        });
}
