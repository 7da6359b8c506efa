//! Input → output dependency table and the dispatcher that runs it.
//!
//! Each output declares the inputs it reads and a pure projection. When an
//! input changes, exactly the outputs listing it are recomputed, in table
//! order; outputs never trigger each other.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::data::filter::{clamp_year, filter, FilterSelection};
use crate::data::model::{Indicator, Table};
use crate::projection::{
    bar_projection, line_projection, map_projection, AnimatedChartData, ChartData,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    Countries,
    Indicator,
    YearCutoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    Bar,
    Line,
    Map,
}

/// A new value for one input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Countries(BTreeSet<String>),
    Indicator(Indicator),
    YearCutoff(i32),
}

impl InputChange {
    pub fn input(&self) -> InputId {
        match self {
            InputChange::Countries(_) => InputId::Countries,
            InputChange::Indicator(_) => InputId::Indicator,
            InputChange::YearCutoff(_) => InputId::YearCutoff,
        }
    }
}

/// The value displayed by an output.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Chart(ChartData),
    Animated(AnimatedChartData),
}

type Projection = fn(&Table, &FilterSelection) -> Figure;

struct Binding {
    output: OutputId,
    inputs: &'static [InputId],
    project: Projection,
}

fn project_bar(table: &Table, selection: &FilterSelection) -> Figure {
    let rows = filter(table, &selection.countries, selection.year_cutoff);
    Figure::Chart(bar_projection(&rows, selection.indicator))
}

fn project_line(table: &Table, selection: &FilterSelection) -> Figure {
    let rows = filter(table, &selection.countries, selection.year_cutoff);
    Figure::Chart(line_projection(&rows, selection.indicator))
}

// Reads only the indicator.
fn project_map(table: &Table, selection: &FilterSelection) -> Figure {
    Figure::Animated(map_projection(table, selection.indicator))
}

fn dependency_table() -> Vec<Binding> {
    const SELECTION: &[InputId] = &[InputId::Countries, InputId::Indicator, InputId::YearCutoff];
    vec![
        Binding {
            output: OutputId::Bar,
            inputs: SELECTION,
            project: project_bar,
        },
        Binding {
            output: OutputId::Line,
            inputs: SELECTION,
            project: project_line,
        },
        Binding {
            output: OutputId::Map,
            inputs: &[InputId::Indicator],
            project: project_map,
        },
    ]
}

struct Rendered {
    figure: Figure,
    revision: u64,
}

/// Owns the current input values and the latest figure of every output.
pub struct Controller {
    table: Arc<Table>,
    selection: FilterSelection,
    bindings: Vec<Binding>,
    outputs: BTreeMap<OutputId, Rendered>,
}

impl Controller {
    /// Clamp `defaults` against the table and perform the initial render.
    pub fn new(table: Arc<Table>, defaults: FilterSelection) -> Self {
        let selection = defaults.clamped(&table);
        let bindings = dependency_table();
        let outputs = bindings
            .iter()
            .map(|b| {
                let rendered = Rendered {
                    figure: (b.project)(&table, &selection),
                    revision: 1,
                };
                (b.output, rendered)
            })
            .collect();

        log::debug!("Initial render with {selection:?}");
        Self {
            table,
            selection,
            bindings,
            outputs,
        }
    }

    /// Store a new input value and recompute the outputs that depend on it.
    ///
    /// Returns the recomputed outputs; empty when the value did not change.
    pub fn apply(&mut self, change: InputChange) -> Vec<OutputId> {
        let input = change.input();
        let changed = match change {
            InputChange::Countries(countries) => {
                replace_if_changed(&mut self.selection.countries, countries)
            }
            InputChange::Indicator(indicator) => {
                replace_if_changed(&mut self.selection.indicator, indicator)
            }
            InputChange::YearCutoff(year) => {
                let clamped = clamp_year(&self.table, year);
                if clamped != year {
                    log::warn!("Year cutoff {year} clamped to {clamped}");
                }
                replace_if_changed(&mut self.selection.year_cutoff, clamped)
            }
        };
        if !changed {
            return Vec::new();
        }

        let mut recomputed = Vec::new();
        for binding in self.bindings.iter().filter(|b| b.inputs.contains(&input)) {
            let figure = (binding.project)(&self.table, &self.selection);
            if let Some(rendered) = self.outputs.get_mut(&binding.output) {
                rendered.figure = figure;
                rendered.revision += 1;
            }
            recomputed.push(binding.output);
        }
        log::debug!("{input:?} changed, recomputed {recomputed:?}");
        recomputed
    }

    pub fn output(&self, id: OutputId) -> Option<&Figure> {
        self.outputs.get(&id).map(|r| &r.figure)
    }

    /// How many times `id` has been rendered, including the initial render.
    pub fn revision(&self, id: OutputId) -> u64 {
        self.outputs.get(&id).map_or(0, |r| r.revision)
    }

    /// Declared inputs of `id`, in declaration order.
    pub fn dependencies(&self, id: OutputId) -> &[InputId] {
        self.bindings
            .iter()
            .find(|b| b.output == id)
            .map(|b| b.inputs)
            .unwrap_or(&[])
    }

    pub fn bar(&self) -> Option<&ChartData> {
        match self.output(OutputId::Bar)? {
            Figure::Chart(chart) => Some(chart),
            Figure::Animated(_) => None,
        }
    }

    pub fn line(&self) -> Option<&ChartData> {
        match self.output(OutputId::Line)? {
            Figure::Chart(chart) => Some(chart),
            Figure::Animated(_) => None,
        }
    }

    pub fn map(&self) -> Option<&AnimatedChartData> {
        match self.output(OutputId::Map)? {
            Figure::Animated(map) => Some(map),
            Figure::Chart(_) => None,
        }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_table;

    fn controller() -> Controller {
        Controller::new(Arc::new(sample_table()), FilterSelection::default())
    }

    fn countries(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn initial_render_covers_every_output() {
        let c = controller();
        for id in [OutputId::Bar, OutputId::Line, OutputId::Map] {
            assert_eq!(c.revision(id), 1);
            assert!(c.output(id).is_some());
        }
        // Russian Federation at 2000 only.
        assert_eq!(c.bar().unwrap().points.len(), 1);
        assert_eq!(c.line().unwrap().points.len(), 1);
        assert_eq!(c.map().unwrap().frames.len(), 6);
    }

    #[test]
    fn declared_dependencies() {
        let c = controller();
        let selection = [InputId::Countries, InputId::Indicator, InputId::YearCutoff];
        assert_eq!(c.dependencies(OutputId::Bar), selection);
        assert_eq!(c.dependencies(OutputId::Line), selection);
        assert_eq!(c.dependencies(OutputId::Map), [InputId::Indicator]);
    }

    #[test]
    fn indicator_change_recomputes_everything() {
        let mut c = controller();
        let recomputed = c.apply(InputChange::Indicator(Indicator::Alcohol));
        assert_eq!(recomputed, [OutputId::Bar, OutputId::Line, OutputId::Map]);
        assert_eq!(c.map().unwrap().indicator, Indicator::Alcohol);
        assert_eq!(c.bar().unwrap().y_label, "Alcohol consumption");
        for id in [OutputId::Bar, OutputId::Line, OutputId::Map] {
            assert_eq!(c.revision(id), 2);
        }
    }

    #[test]
    fn year_change_leaves_map_alone() {
        let mut c = controller();
        let map_before = c.map().unwrap().clone();

        let recomputed = c.apply(InputChange::YearCutoff(2003));
        assert_eq!(recomputed, [OutputId::Bar, OutputId::Line]);
        assert_eq!(c.revision(OutputId::Map), 1);
        assert_eq!(c.map().unwrap(), &map_before);
        assert_eq!(c.bar().unwrap().points.len(), 4);
    }

    #[test]
    fn country_change_recomputes_bar_and_line() {
        let mut c = controller();
        c.apply(InputChange::YearCutoff(2005));
        let recomputed = c.apply(InputChange::Countries(countries(&["Russian Federation", "Germany"])));
        assert_eq!(recomputed, [OutputId::Bar, OutputId::Line]);
        assert_eq!(c.line().unwrap().series().len(), 2);
        assert_eq!(c.revision(OutputId::Bar), 3);
        assert_eq!(c.revision(OutputId::Map), 1);
    }

    #[test]
    fn unchanged_value_is_a_no_op() {
        let mut c = controller();
        assert!(c.apply(InputChange::Indicator(Indicator::LifeExpectancyMen)).is_empty());
        assert!(c.apply(InputChange::YearCutoff(2000)).is_empty());
        assert!(c
            .apply(InputChange::Countries(countries(&["Russian Federation"])))
            .is_empty());
        assert_eq!(c.revision(OutputId::Bar), 1);
    }

    #[test]
    fn out_of_range_cutoff_is_clamped() {
        let mut c = controller();
        c.apply(InputChange::YearCutoff(2042));
        assert_eq!(c.selection().year_cutoff, 2005);
        assert_eq!(c.bar().unwrap().points.len(), 6);

        // 1990 clamps to 2000, which differs from 2005.
        assert_eq!(c.apply(InputChange::YearCutoff(1990)).len(), 2);
        assert_eq!(c.selection().year_cutoff, 2000);
    }

    #[test]
    fn clearing_countries_empties_bar_and_line() {
        let mut c = controller();
        c.apply(InputChange::Countries(BTreeSet::new()));
        assert!(c.bar().unwrap().is_empty());
        assert!(c.line().unwrap().is_empty());
        assert!(!c.map().unwrap().frames.is_empty());
    }

    #[test]
    fn defaults_are_clamped_at_construction() {
        let defaults = FilterSelection {
            year_cutoff: 1950,
            ..FilterSelection::default()
        };
        let c = Controller::new(Arc::new(sample_table()), defaults);
        assert_eq!(c.selection().year_cutoff, 2000);
    }
}
