use std::path::Path;

use foreclosure_dashboard::data::{
    calculate_metrics, create_chart_data, format_data_for_display, get_filter_options, load_with_options,
    ChartSeries, Dataset, DisplayTable, FilterOptions, FilterSelection, GroupBy, LoadOptions, LoadReport, Metrics,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which filter dimension a widget edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Location,
    Year,
}

/// Outputs of one recomputation pass over the current selection.
#[derive(Debug, Clone, Default)]
pub struct View {
    /// Number of cases passing the current filters.
    pub shown: usize,
    /// `None` when the filtered dataset is empty.
    pub metrics: Option<Metrics>,
    pub chart: ChartSeries,
    pub table: DisplayTable,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Selectable values of the full dataset.
    pub options: FilterOptions,

    /// Current sidebar selection.
    pub selection: FilterSelection,

    /// Derived outputs for the current selection (cached).
    pub view: View,

    /// Chart x-axis dimension.
    pub group_by: GroupBy,

    /// Bar colours for the current chart categories.
    pub color_map: ColorMap,

    /// Column names and row policy used for File → Open.
    pub load_options: LoadOptions,

    /// Summary of the last successful load.
    pub load_report: Option<LoadReport>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub title: String,
}

impl AppState {
    pub fn new(load_options: LoadOptions, group_by: GroupBy, title: String) -> Self {
        Self {
            dataset: None,
            options: FilterOptions::default(),
            selection: FilterSelection::default(),
            view: View::default(),
            group_by,
            color_map: ColorMap::default(),
            load_options,
            load_report: None,
            status_message: None,
            title,
        }
    }

    /// Load a CSV file, replacing the current dataset on success.
    /// Returns whether the load succeeded.
    pub fn load_path(&mut self, path: &Path) -> bool {
        match load_with_options(path, &self.load_options) {
            Ok(loaded) => {
                self.status_message = match loaded.report.row_errors.len() {
                    0 => None,
                    n => Some(format!("{n} row(s) skipped: unparseable dates or empty zip")),
                };
                self.load_report = Some(loaded.report);
                self.set_dataset(loaded.dataset);
                true
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                false
            }
        }
    }

    /// Ingest a newly loaded dataset, select everything, and recompute.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.options = get_filter_options(&dataset);
        self.selection = FilterSelection::all(&self.options);
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// Recompute every derived output after a selection or grouping change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = View::default();
            return;
        };

        let filtered = self.selection.apply(ds);
        let metrics = if filtered.is_empty() {
            None
        } else {
            calculate_metrics(&filtered).ok()
        };
        let chart = create_chart_data(&filtered, self.group_by);
        self.color_map = ColorMap::new(&chart.categories());

        log::debug!(
            "Filter pass: {} of {} cases, {} chart categories",
            filtered.len(),
            ds.len(),
            self.color_map.len()
        );

        self.view = View {
            shown: filtered.len(),
            metrics,
            chart,
            table: format_data_for_display(&filtered),
        };
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        if self.group_by != group_by {
            self.group_by = group_by;
            self.refilter();
        }
    }

    pub fn is_location_selected(&self, location: &str) -> bool {
        self.selection.locations.contains(location)
    }

    pub fn is_year_selected(&self, year: i32) -> bool {
        self.selection.years.contains(&year)
    }

    /// Toggle a single location in the filter.
    pub fn toggle_location(&mut self, location: &str) {
        if !self.selection.locations.remove(location) {
            self.selection.locations.insert(location.to_string());
        }
        self.refilter();
    }

    /// Toggle a single filing year in the filter.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        self.refilter();
    }

    /// Select every value of one dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Location => {
                self.selection.locations = self.options.locations.iter().cloned().collect();
            }
            Dimension::Year => self.selection.years = self.options.years.iter().copied().collect(),
        }
        self.refilter();
    }

    /// Deselect every value of one dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Location => self.selection.locations.clear(),
            Dimension::Year => self.selection.years.clear(),
        }
        self.refilter();
    }
}
