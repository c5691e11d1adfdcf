/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///   foreclosures .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse dates, derive calendar fields → Dataset
///   └──────────┘
///        │
///        ├──────────────► filter::get_filter_options  (once, full dataset)
///        ▼
///   ┌──────────┐
///   │  filter   │  selected zips × selected years → filtered Dataset
///   └──────────┘
///        │
///        ├──► metrics  (summary cards)
///        ├──► chart    (bar series)
///        └──► display  (details table)
/// ```

pub mod chart;
pub mod display;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;

pub use chart::{create_chart_data, ChartOrder, ChartSeries, GroupBy};
pub use display::{format_data_for_display, DisplayTable};
pub use error::{DataError, RowError};
pub use filter::{filter_data, get_filter_options, FilterOptions, FilterSelection};
pub use loader::{load_and_preprocess_data, load_with_options, ColumnMap, LoadOptions, LoadReport, RowPolicy};
pub use metrics::{calculate_metrics, Metrics};
pub use model::{Dataset, Record};
