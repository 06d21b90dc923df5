//! Explorer sessions: the parse → filter → sort → aggregate pipeline with memoized views.
//!
//! This module sits "above" [`crate::ingestion`] and [`crate::processing`] and provides:
//!
//! - [`Explorer`], which owns the raw text and transform parameters and lazily derives the parsed,
//!   transformed and aggregated views, recomputing only what a parameter change invalidates
//! - stage timing via [`PipelineObserver`] events and [`PipelineMetrics`]
//! - [`Debouncer`] for coalescing rapid parameter updates before they reach the explorer

mod debounce;
mod observer;

use std::cell::OnceCell;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::error::ExplorerResult;
use crate::ingestion::{
    column_names, column_type, load_csv_from_path, parse_with_observer, IngestionObserver, LoadOptions,
    SkippedRow, StdErrObserver,
};
use crate::processing::{aggregate, filter, paginate, sort, Page};
use crate::types::{AggregationResult, ColumnType, FilterSpec, Row, SortSpec};

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use observer::{
    PipelineEvent, PipelineMetrics, PipelineMetricsSnapshot, PipelineObserver, StdErrPipelineObserver,
};

/// A data-exploration session over one CSV text.
///
/// Derived views are computed on first access and cached until an input they depend on changes:
///
/// - `parsed_data` depends on the text
/// - `transformed_data` = sort(filter(parsed)) depends on the text, filter and sort
/// - `aggregation_data` depends on all of the above plus the aggregation settings
///
/// Setting a parameter to the value it already has invalidates nothing.
///
/// ```rust
/// use data_explorer::execution::Explorer;
/// use data_explorer::types::{FilterOperator, FilterSpec, SortSpec};
///
/// let mut explorer = Explorer::new();
/// explorer.load("Name,Dept,Salary\nJohn,Eng,75000\nJane,Ops,65000\nBob,Eng,85000", "staff.csv");
///
/// explorer.set_filter(FilterSpec::new("Dept", FilterOperator::Equals, "eng"));
/// explorer.set_sort(SortSpec::descending("Salary"));
/// assert_eq!(explorer.transformed_data().len(), 2);
///
/// explorer.set_show_aggregation(true);
/// explorer.set_group_by("Dept");
/// explorer.set_aggregate_column("Salary");
/// assert_eq!(explorer.aggregation_data()[0].sum, Some(160000.0));
/// ```
pub struct Explorer {
    text: Option<String>,
    file_name: String,
    filter: FilterSpec,
    sort: SortSpec,
    show_aggregation: bool,
    group_by: String,
    aggregate_column: String,

    observer: Arc<dyn IngestionObserver>,
    pipeline_observer: Option<Arc<dyn PipelineObserver>>,

    parsed: OnceCell<Vec<Row>>,
    // `None` when filter and sort were both no-ops and the parsed rows are served as-is.
    transformed: OnceCell<Option<Vec<Row>>>,
    aggregated: OnceCell<Vec<AggregationResult>>,
}

impl Explorer {
    /// Create an empty session. Skipped rows are reported to stderr.
    pub fn new() -> Self {
        Self {
            text: None,
            file_name: String::new(),
            filter: FilterSpec::default(),
            sort: SortSpec::default(),
            show_aggregation: false,
            group_by: String::new(),
            aggregate_column: String::new(),
            observer: Arc::new(StdErrObserver),
            pipeline_observer: None,
            parsed: OnceCell::new(),
            transformed: OnceCell::new(),
            aggregated: OnceCell::new(),
        }
    }

    /// Route parse diagnostics to `observer` instead of stderr.
    pub fn with_observer(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Attach an observer for stage timing events.
    pub fn with_pipeline_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.pipeline_observer = Some(observer);
        self
    }

    /// Start a new dataset: replaces the text and resets filter, sort and aggregation settings.
    pub fn load(&mut self, text: impl Into<String>, file_name: impl Into<String>) {
        self.text = Some(text.into());
        self.file_name = file_name.into();
        self.reset_params();
        self.invalidate_parsed();
    }

    /// Read a CSV file and [`load`](Self::load) it.
    ///
    /// On error the session is left untouched.
    pub fn load_path(&mut self, path: impl AsRef<Path>, options: &LoadOptions) -> ExplorerResult<()> {
        let loaded = load_csv_from_path(path, options)?;
        self.load(loaded.text, loaded.name);
        Ok(())
    }

    /// Drop the dataset and every setting.
    pub fn clear(&mut self) {
        self.text = None;
        self.file_name.clear();
        self.reset_params();
        self.invalidate_parsed();
    }

    /// Clear filter and sort, keeping the dataset and aggregation settings.
    pub fn reset_filters(&mut self) {
        self.set_filter(FilterSpec::default());
        self.set_sort(SortSpec::default());
    }

    pub fn set_filter(&mut self, spec: FilterSpec) {
        if self.filter != spec {
            self.filter = spec;
            self.invalidate_transformed();
        }
    }

    pub fn set_sort(&mut self, spec: SortSpec) {
        if self.sort != spec {
            self.sort = spec;
            self.invalidate_transformed();
        }
    }

    /// Header-click sorting; see [`SortSpec::toggled`].
    pub fn toggle_sort(&mut self, column: &str) {
        let next = self.sort.toggled(column);
        self.set_sort(next);
    }

    pub fn set_show_aggregation(&mut self, show: bool) {
        if self.show_aggregation != show {
            self.show_aggregation = show;
            self.invalidate_aggregated();
        }
    }

    pub fn set_group_by(&mut self, column: impl Into<String>) {
        let column = column.into();
        if self.group_by != column {
            self.group_by = column;
            self.invalidate_aggregated();
        }
    }

    pub fn set_aggregate_column(&mut self, column: impl Into<String>) {
        let column = column.into();
        if self.aggregate_column != column {
            self.aggregate_column = column;
            self.invalidate_aggregated();
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn show_aggregation(&self) -> bool {
        self.show_aggregation
    }

    pub fn group_by(&self) -> &str {
        &self.group_by
    }

    pub fn aggregate_column(&self) -> &str {
        &self.aggregate_column
    }

    /// Rows parsed from the current text; empty when no text is loaded.
    pub fn parsed_data(&self) -> &[Row] {
        self.parsed.get_or_init(|| {
            let Some(text) = self.text.as_deref() else {
                return Vec::new();
            };
            let start = Instant::now();
            let counter = SkipCounter::new(self.observer.as_ref());
            let rows = parse_with_observer(text, &counter);
            self.emit(PipelineEvent::Parsed {
                rows: rows.len(),
                skipped: counter.count(),
                elapsed: start.elapsed(),
            });
            rows
        })
    }

    /// Parsed rows with the filter, then the sort, applied.
    pub fn transformed_data(&self) -> &[Row] {
        let parsed = self.parsed_data();
        let cached = self.transformed.get_or_init(|| {
            if parsed.is_empty() {
                return None;
            }
            let start = Instant::now();
            let filtered = filter(parsed, &self.filter);
            let sorted = sort(&filtered, &self.sort);
            let output_rows = sorted.len();
            let owned = if self.filter.is_noop() && self.sort.is_noop() {
                None
            } else {
                Some(sorted.into_owned())
            };
            self.emit(PipelineEvent::Transformed {
                input_rows: parsed.len(),
                output_rows,
                elapsed: start.elapsed(),
            });
            owned
        });
        cached.as_deref().unwrap_or(parsed)
    }

    /// Group summaries of the transformed rows.
    ///
    /// Empty unless aggregation is switched on, a group-by column is set and there are rows.
    pub fn aggregation_data(&self) -> &[AggregationResult] {
        let transformed = self.transformed_data();
        self.aggregated.get_or_init(|| {
            if !self.show_aggregation || self.group_by.is_empty() || transformed.is_empty() {
                return Vec::new();
            }
            let start = Instant::now();
            let aggregate_column = Some(self.aggregate_column.as_str()).filter(|c| !c.is_empty());
            let results = aggregate(transformed, &self.group_by, aggregate_column);
            self.emit(PipelineEvent::Aggregated {
                input_rows: transformed.len(),
                groups: results.len(),
                elapsed: start.elapsed(),
            });
            results
        })
    }

    /// Column names of the parsed data, in header order.
    pub fn column_names(&self) -> Vec<String> {
        column_names(self.parsed_data())
    }

    pub fn column_type(&self, column: &str) -> ColumnType {
        column_type(self.parsed_data(), column)
    }

    /// One page of the transformed rows.
    pub fn page(&self, page: usize, page_size: usize) -> Page<'_> {
        paginate(self.transformed_data(), page, page_size)
    }

    fn reset_params(&mut self) {
        self.filter = FilterSpec::default();
        self.sort = SortSpec::default();
        self.show_aggregation = false;
        self.group_by.clear();
        self.aggregate_column.clear();
    }

    fn invalidate_parsed(&mut self) {
        self.parsed.take();
        self.invalidate_transformed();
    }

    fn invalidate_transformed(&mut self) {
        self.transformed.take();
        self.invalidate_aggregated();
    }

    fn invalidate_aggregated(&mut self) {
        self.aggregated.take();
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(obs) = &self.pipeline_observer {
            obs.on_event(&event);
        }
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Explorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Explorer")
            .field("file_name", &self.file_name)
            .field("text_len", &self.text.as_ref().map(String::len))
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("show_aggregation", &self.show_aggregation)
            .field("group_by", &self.group_by)
            .field("aggregate_column", &self.aggregate_column)
            .field("pipeline_observer_set", &self.pipeline_observer.is_some())
            .finish()
    }
}

/// Forwards skipped-row reports while counting them.
struct SkipCounter<'a> {
    inner: &'a dyn IngestionObserver,
    skipped: AtomicUsize,
}

impl<'a> SkipCounter<'a> {
    fn new(inner: &'a dyn IngestionObserver) -> Self {
        Self {
            inner,
            skipped: AtomicUsize::new(0),
        }
    }

    fn count(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }
}

impl IngestionObserver for SkipCounter<'_> {
    fn on_row_skipped(&self, row: &SkippedRow) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
        self.inner.on_row_skipped(row);
    }
}
